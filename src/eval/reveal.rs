//! Draw-in reveal allocation across independent strokes or sub-paths.
//!
//! A single global budget is spent on segments in their original order. A
//! segment either gets a prefix of itself or nothing; nothing ever bridges the
//! end of one segment to the start of the next.

/// Added before flooring so exact integer boundaries don't lose a unit to
/// floating-point error.
pub const REVEAL_EPSILON: f64 = 0.00001;

fn clamp_progress(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Number of units revealed out of `total` at eased progress `p`.
///
/// Zero progress reveals nothing; any positive progress reveals at least one
/// unit when content exists.
pub fn target_units(total: usize, p: f64) -> usize {
    let p = clamp_progress(p);
    if total == 0 || p <= 0.0 {
        return 0;
    }
    if total == 1 {
        return 1;
    }
    let raw = (p * total as f64 + REVEAL_EPSILON).floor() as usize;
    raw.clamp(1, total)
}

/// Per-segment unit counts for segments of the given sizes.
pub fn allocate_counts(sizes: &[usize], p: f64) -> Vec<usize> {
    let total = sizes.iter().sum();
    let mut remaining = target_units(total, p);
    sizes
        .iter()
        .map(|&size| {
            let take = size.min(remaining);
            remaining -= take;
            take
        })
        .collect()
}

/// Reveal a prefix of each segment according to the global budget.
///
/// Segments past the exhausted budget come back empty.
pub fn allocate_reveal<T: Clone>(segments: &[Vec<T>], p: f64) -> Vec<Vec<T>> {
    let sizes: Vec<usize> = segments.iter().map(Vec::len).collect();
    segments
        .iter()
        .zip(allocate_counts(&sizes, p))
        .map(|(seg, take)| seg[..take].to_vec())
        .collect()
}

/// Length revealed out of `total` canvas units at eased progress `p`.
///
/// Same rule as [`target_units`] with lengths floored to whole units; full
/// progress always reveals the exact total.
pub fn target_length(total: f64, p: f64) -> f64 {
    let p = clamp_progress(p);
    if !(total > 0.0) || !total.is_finite() || p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 || total <= 1.0 {
        return total;
    }
    (p * total + REVEAL_EPSILON).floor().max(1.0).min(total)
}

/// Per-segment revealed lengths for sub-paths of the given lengths.
pub fn allocate_lengths(lengths: &[f64], p: f64) -> Vec<f64> {
    let lengths: Vec<f64> = lengths
        .iter()
        .map(|&l| if l.is_finite() && l > 0.0 { l } else { 0.0 })
        .collect();
    let total: f64 = lengths.iter().sum();
    let mut remaining = target_length(total, p);
    lengths
        .iter()
        .map(|&len| {
            let take = len.min(remaining);
            remaining = (remaining - take).max(0.0);
            take
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/eval/reveal.rs"]
mod tests;
