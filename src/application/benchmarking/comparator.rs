use crate::domain::benchmark::{BenchmarkSample, ComparisonResult};

/// Compare a fresh sample against the stored best.
///
/// With no baseline the sample is trivially the new best and every delta is
/// 0. Otherwise each metric's delta is `(current - previous) / previous *
/// 100`: negative means improvement, positive regression. `is_new_best` is
/// decided by the time dimension alone, with a strict `<` — matching the
/// best-selection tie-break, an equal time does not displace the record.
///
/// A previous value of 0 yields a delta of 0.0 for that metric: a zero
/// baseline carries no relative information, the same as having no baseline
/// at all.
pub fn compare(current: &BenchmarkSample, previous_best: Option<&BenchmarkSample>) -> ComparisonResult {
    let Some(previous) = previous_best else {
        return ComparisonResult {
            time_delta_pct: 0.0,
            memory_delta_pct: 0.0,
            alloc_delta_pct: 0.0,
            is_new_best: true,
        };
    };

    ComparisonResult {
        time_delta_pct: delta_pct(current.ns_per_op, previous.ns_per_op),
        memory_delta_pct: delta_pct(current.bytes_per_op, previous.bytes_per_op),
        alloc_delta_pct: delta_pct(current.allocs_per_op, previous.allocs_per_op),
        is_new_best: current.ns_per_op < previous.ns_per_op,
    }
}

fn delta_pct(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}
