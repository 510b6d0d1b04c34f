use ordered_float::OrderedFloat;
use smallvec::SmallVec;

/// Snaps `target` to the nearest member of `sorted_values`.
///
/// `sorted_values` must be ascending and free of duplicates. Targets at or past
/// either end clamp to that end. Between two samples the closer one wins and
/// an exact tie resolves to the later (larger) sample.
///
/// Returns `None` only for an empty slice or a NaN target.
#[must_use]
pub fn nearest_sample(sorted_values: &[f64], target: f64) -> Option<f64> {
    if sorted_values.is_empty() || target.is_nan() {
        return None;
    }

    let after = sorted_values.partition_point(|value| *value < target);
    // Later sample first: `min_by_key` keeps the first of equal distances.
    let mut candidates: SmallVec<[f64; 2]> = SmallVec::new();
    if let Some(value) = sorted_values.get(after) {
        candidates.push(*value);
    }
    if after > 0 {
        candidates.push(sorted_values[after - 1]);
    }

    candidates
        .into_iter()
        .min_by_key(|value| OrderedFloat((value - target).abs()))
}

/// Sorts ascending and removes duplicates, dropping non-finite samples.
#[must_use]
pub fn sorted_distinct(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::{nearest_sample, sorted_distinct};

    #[test]
    fn tie_between_samples_resolves_to_later_sample() {
        assert_eq!(nearest_sample(&[1.0, 3.0, 7.0], 5.0), Some(7.0));
    }

    #[test]
    fn target_outside_samples_clamps_to_boundary() {
        let samples = [10.0, 20.0, 30.0];
        assert_eq!(nearest_sample(&samples, -5.0), Some(10.0));
        assert_eq!(nearest_sample(&samples, 31.0), Some(30.0));
    }

    #[test]
    fn empty_samples_have_no_snap() {
        assert_eq!(nearest_sample(&[], 1.0), None);
    }

    #[test]
    fn sorted_distinct_drops_duplicates_and_nan() {
        let values = sorted_distinct([3.0, 1.0, f64::NAN, 3.0, 2.0]);
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }
}
