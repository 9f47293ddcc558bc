/// Linear progress of an animation window at `current_time`, in `[0, 1]`.
///
/// - Before `start` the result is `0`.
/// - A non-positive (or NaN) `duration` means the animation completes the
///   instant it starts, so any time at or after `start` yields `1`.
/// - Otherwise elapsed time is clamped to `[0, duration]` and normalized.
///
/// Never returns NaN, whatever the inputs.
pub fn resolve_progress(current_time: f64, start: f64, duration: f64) -> f64 {
    let elapsed = current_time - start;
    if elapsed.is_nan() || elapsed < 0.0 {
        return 0.0;
    }
    if !(duration > 0.0) {
        return 1.0;
    }

    let p = elapsed.min(duration) / duration;
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/progress.rs"]
mod tests;
