use crate::application::benchmarking::{compare, parse_bench_output};
use crate::domain::benchmark::{BenchmarkSample, ComparisonResult};
use crate::domain::errors::TrackError;
use crate::domain::repositories::{BenchmarkRepository, ProblemRepository};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Composes the benchmark path: parse the harness output, compare against
/// the stored best, then append the new sample. Collaborators are injected
/// at construction.
pub struct BenchmarkService {
    problems: Arc<dyn ProblemRepository>,
    benchmarks: Arc<dyn BenchmarkRepository>,
}

impl BenchmarkService {
    pub fn new(
        problems: Arc<dyn ProblemRepository>,
        benchmarks: Arc<dyn BenchmarkRepository>,
    ) -> Self {
        Self {
            problems,
            benchmarks,
        }
    }

    /// Record one benchmark run for a problem.
    ///
    /// The comparison is taken against the best sample recorded *before*
    /// this run, so a repeat of the current best reports a 0% delta without
    /// claiming a new record.
    pub async fn record(
        &self,
        problem_id: i64,
        raw: &str,
    ) -> Result<(BenchmarkSample, ComparisonResult), TrackError> {
        if self.problems.find(problem_id).await?.is_none() {
            return Err(TrackError::ProblemNotFound { id: problem_id });
        }

        let parsed = parse_bench_output(raw)?;
        let mut sample = parsed.into_sample(problem_id, Utc::now());

        let previous_best = self.benchmarks.best(problem_id).await?;
        let result = compare(&sample, previous_best.as_ref());

        let id = self.benchmarks.append(&sample).await?;
        sample.id = Some(id);

        info!(
            problem_id,
            name = %sample.name,
            ns_per_op = sample.ns_per_op,
            new_best = result.is_new_best,
            "Benchmark sample recorded"
        );

        Ok((sample, result))
    }

    /// Full sample history for a problem, most recent first.
    pub async fn history(&self, problem_id: i64) -> Result<Vec<BenchmarkSample>, TrackError> {
        if self.problems.find(problem_id).await?.is_none() {
            return Err(TrackError::ProblemNotFound { id: problem_id });
        }
        self.benchmarks.history(problem_id).await
    }

    /// The current best sample for a problem, if any.
    pub async fn best(&self, problem_id: i64) -> Result<Option<BenchmarkSample>, TrackError> {
        self.benchmarks.best(problem_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{InMemoryBenchmarkRepository, InMemoryProblemRepository};

    async fn service_with_problem() -> (BenchmarkService, i64) {
        let problems = Arc::new(InMemoryProblemRepository::new());
        let id = problems
            .insert("two-sum", "Two Sum", "easy", "arrays")
            .await
            .unwrap();
        let service = BenchmarkService::new(problems, Arc::new(InMemoryBenchmarkRepository::new()));
        (service, id)
    }

    #[tokio::test]
    async fn test_first_run_is_new_best() {
        let (service, id) = service_with_problem().await;

        let (sample, result) = service
            .record(id, "BenchmarkTwoSum-8 1000000 1234 ns/op 512 B/op 5 allocs/op")
            .await
            .unwrap();

        assert!(result.is_new_best);
        assert_eq!(result.time_delta_pct, 0.0);
        assert_eq!(sample.ns_per_op, 1234.0);
        assert!(sample.id.is_some());
    }

    #[tokio::test]
    async fn test_faster_run_beats_stored_best() {
        let (service, id) = service_with_problem().await;

        service
            .record(id, "BenchmarkTwoSum-8 1000000 1000 ns/op")
            .await
            .unwrap();
        let (_, result) = service
            .record(id, "BenchmarkTwoSum-8 1000000 800 ns/op")
            .await
            .unwrap();

        assert!(result.is_new_best);
        assert_eq!(result.time_delta_pct, -20.0);
    }

    #[tokio::test]
    async fn test_slower_run_compares_against_best_not_latest() {
        let (service, id) = service_with_problem().await;

        service
            .record(id, "BenchmarkTwoSum-8 1000000 1000 ns/op")
            .await
            .unwrap();
        service
            .record(id, "BenchmarkTwoSum-8 1000000 1500 ns/op")
            .await
            .unwrap();
        let (_, result) = service
            .record(id, "BenchmarkTwoSum-8 1000000 1200 ns/op")
            .await
            .unwrap();

        // Baseline is still the 1000 ns/op record, not the 1500 ns/op run.
        assert!(!result.is_new_best);
        assert_eq!(result.time_delta_pct, 20.0);
    }

    #[tokio::test]
    async fn test_unknown_problem_is_not_found() {
        let (service, _) = service_with_problem().await;

        let err = service
            .record(999, "BenchmarkTwoSum-8 1000000 1234 ns/op")
            .await;
        assert!(matches!(err, Err(TrackError::ProblemNotFound { id: 999 })));
    }

    #[tokio::test]
    async fn test_unparseable_output_records_nothing() {
        let (service, id) = service_with_problem().await;

        let err = service.record(id, "no benchmark output here").await;
        assert!(matches!(err, Err(TrackError::BenchParse { .. })));
        assert!(service.history(id).await.unwrap().is_empty());
    }
}
