use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One immutable micro-benchmark measurement for a problem's solution.
///
/// The "best" sample for a problem is the one with minimum `ns_per_op`
/// across all of its samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSample {
    pub id: Option<i64>,
    pub problem_id: i64,
    /// Benchmark name with the `Benchmark` prefix and `-N` suffix stripped.
    pub name: String,
    pub iterations: i64,
    pub ns_per_op: f64,
    pub bytes_per_op: f64,
    pub allocs_per_op: f64,
    /// The harness output verbatim, kept for display alongside the parsed
    /// fields.
    pub raw: String,
    pub created_at: DateTime<Utc>,
}

/// The structured fields lifted out of one benchmark result line, before a
/// problem id or timestamp is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBench {
    pub name: String,
    pub iterations: i64,
    pub ns_per_op: f64,
    pub bytes_per_op: f64,
    pub allocs_per_op: f64,
    pub raw: String,
}

impl ParsedBench {
    pub fn into_sample(self, problem_id: i64, now: DateTime<Utc>) -> BenchmarkSample {
        BenchmarkSample {
            id: None,
            problem_id,
            name: self.name,
            iterations: self.iterations,
            ns_per_op: self.ns_per_op,
            bytes_per_op: self.bytes_per_op,
            allocs_per_op: self.allocs_per_op,
            raw: self.raw,
            created_at: now,
        }
    }
}

/// Derived comparison between a fresh sample and the stored best. Never
/// persisted. Negative deltas mean improvement, positive mean regression;
/// values are plain un-rounded percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub time_delta_pct: f64,
    pub memory_delta_pct: f64,
    pub alloc_delta_pct: f64,
    pub is_new_best: bool,
}
