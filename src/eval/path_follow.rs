use crate::foundation::core::Point;

/// Position on a polyline plus the direction of travel there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSample {
    pub point: Point,
    /// Direction of the bracketing segment in degrees, `None` for degenerate paths.
    pub tangent_deg: Option<f64>,
}

/// Sample a polyline at fractional arc length `progress`.
///
/// Fewer than two points (or a path of zero length) yields the first point,
/// or the origin when empty, with no tangent.
pub fn sample_at_progress(points: &[Point], progress: f64) -> PathSample {
    let fallback = PathSample {
        point: points.first().copied().unwrap_or(Point::ORIGIN),
        tangent_deg: None,
    };
    if points.len() < 2 {
        return fallback;
    }

    let lengths: Vec<f64> = points.windows(2).map(|w| w[0].distance(w[1])).collect();
    let total: f64 = lengths.iter().sum();
    if !(total > 0.0) || !total.is_finite() {
        return fallback;
    }

    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let target = p * total;

    let mut acc = 0.0;
    let mut last = None;
    for (i, &len) in lengths.iter().enumerate() {
        if len <= 0.0 {
            continue;
        }
        let (a, b) = (points[i], points[i + 1]);
        last = Some((a, b));
        if acc + len >= target {
            let t = ((target - acc) / len).clamp(0.0, 1.0);
            return PathSample {
                point: a.lerp(b, t),
                tangent_deg: Some((b - a).atan2().to_degrees()),
            };
        }
        acc += len;
    }

    // Rounding left the target just past the accumulated length.
    match last {
        Some((a, b)) => PathSample {
            point: b,
            tangent_deg: Some((b - a).atan2().to_degrees()),
        },
        None => fallback,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/path_follow.rs"]
mod tests;
