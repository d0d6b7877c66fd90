//! Repository Pattern Abstractions
//!
//! Trait seams between the tracking/benchmarking services and storage.
//! Implementations live in `infrastructure`: SQLite-backed for the real
//! store, in-memory for tests.
//!
//! Note that the progress *write* path is deliberately not behind these
//! traits: `ProgressTracker` owns an explicit SQLite transaction so that the
//! progress update and the attempt append commit or roll back together. The
//! traits cover the catalog, the read side, and the benchmark log, where
//! single-statement atomicity is enough.

use crate::domain::benchmark::BenchmarkSample;
use crate::domain::errors::TrackError;
use crate::domain::problem::Problem;
use crate::domain::progress::{ProgressRecord, ProgressSummary, SolutionAttempt};
use async_trait::async_trait;

/// Read/seed access to the immutable problem catalog.
#[async_trait]
pub trait ProblemRepository: Send + Sync {
    /// Find a problem by id, or None if the catalog has no such entry.
    async fn find(&self, id: i64) -> Result<Option<Problem>, TrackError>;

    /// Find a problem by its slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Problem>, TrackError>;

    /// All catalog entries, ordered by id.
    async fn list(&self) -> Result<Vec<Problem>, TrackError>;

    /// Insert a catalog entry. Seeding only; the core never mutates the
    /// catalog.
    async fn insert(&self, slug: &str, title: &str, difficulty: &str, topic: &str)
        -> Result<i64, TrackError>;

    async fn count(&self) -> Result<i64, TrackError>;
}

/// Read side of the per-problem progress state, for reporting.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// The progress record for a problem, or None if never attempted.
    async fn get(&self, problem_id: i64) -> Result<Option<ProgressRecord>, TrackError>;

    /// Full attempt history for a problem, most recent first.
    async fn attempts(&self, problem_id: i64) -> Result<Vec<SolutionAttempt>, TrackError>;

    /// Aggregate counts across the catalog.
    async fn summary(&self) -> Result<ProgressSummary, TrackError>;
}

/// Append-only benchmark sample log.
#[async_trait]
pub trait BenchmarkRepository: Send + Sync {
    /// Append one sample, returning its assigned id.
    async fn append(&self, sample: &BenchmarkSample) -> Result<i64, TrackError>;

    /// The sample with minimum ns/op for a problem. Ties resolve to the
    /// earliest recorded sample.
    async fn best(&self, problem_id: i64) -> Result<Option<BenchmarkSample>, TrackError>;

    /// All samples for a problem, most recent first.
    async fn history(&self, problem_id: i64) -> Result<Vec<BenchmarkSample>, TrackError>;
}
