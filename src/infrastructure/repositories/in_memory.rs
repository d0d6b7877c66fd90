//! In-Memory Repository Implementations
//!
//! Thread-safe, in-memory implementations of the repository traits in
//! `domain::repositories`, backed by `Arc<RwLock>`. Used by unit tests and
//! useful for throwaway runs; real persistence is the SQLite-backed
//! implementations in `infrastructure::persistence`.

use crate::domain::benchmark::BenchmarkSample;
use crate::domain::errors::TrackError;
use crate::domain::problem::{Difficulty, Problem};
use crate::domain::repositories::{BenchmarkRepository, ProblemRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of ProblemRepository
pub struct InMemoryProblemRepository {
    problems: Arc<RwLock<Vec<Problem>>>,
}

impl InMemoryProblemRepository {
    pub fn new() -> Self {
        Self {
            problems: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryProblemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProblemRepository for InMemoryProblemRepository {
    async fn find(&self, id: i64) -> Result<Option<Problem>, TrackError> {
        let problems = self.problems.read().await;
        Ok(problems.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Problem>, TrackError> {
        let problems = self.problems.read().await;
        Ok(problems.iter().find(|p| p.slug == slug).cloned())
    }

    async fn list(&self) -> Result<Vec<Problem>, TrackError> {
        Ok(self.problems.read().await.clone())
    }

    async fn insert(
        &self,
        slug: &str,
        title: &str,
        difficulty: &str,
        topic: &str,
    ) -> Result<i64, TrackError> {
        let difficulty =
            Difficulty::from_str(difficulty).map_err(|e| TrackError::validation(e.to_string()))?;

        let mut problems = self.problems.write().await;
        let id = problems.len() as i64 + 1;
        problems.push(Problem {
            id,
            slug: slug.to_string(),
            title: title.to_string(),
            difficulty,
            topic: topic.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn count(&self) -> Result<i64, TrackError> {
        Ok(self.problems.read().await.len() as i64)
    }
}

/// In-memory implementation of BenchmarkRepository
pub struct InMemoryBenchmarkRepository {
    samples: Arc<RwLock<Vec<BenchmarkSample>>>,
}

impl InMemoryBenchmarkRepository {
    pub fn new() -> Self {
        Self {
            samples: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryBenchmarkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BenchmarkRepository for InMemoryBenchmarkRepository {
    async fn append(&self, sample: &BenchmarkSample) -> Result<i64, TrackError> {
        let mut samples = self.samples.write().await;
        let id = samples.len() as i64 + 1;
        let mut stored = sample.clone();
        stored.id = Some(id);
        samples.push(stored);
        Ok(id)
    }

    async fn best(&self, problem_id: i64) -> Result<Option<BenchmarkSample>, TrackError> {
        let samples = self.samples.read().await;
        // Earliest insertion wins ties: strictly-less comparison over a
        // forward scan keeps the first minimal sample.
        let mut best: Option<&BenchmarkSample> = None;
        for s in samples.iter().filter(|s| s.problem_id == problem_id) {
            if best.is_none_or(|b| s.ns_per_op < b.ns_per_op) {
                best = Some(s);
            }
        }
        Ok(best.cloned())
    }

    async fn history(&self, problem_id: i64) -> Result<Vec<BenchmarkSample>, TrackError> {
        let samples = self.samples.read().await;
        Ok(samples
            .iter()
            .rev()
            .filter(|s| s.problem_id == problem_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(problem_id: i64, ns: f64) -> BenchmarkSample {
        BenchmarkSample {
            id: None,
            problem_id,
            name: "TwoSum".to_string(),
            iterations: 1_000_000,
            ns_per_op: ns,
            bytes_per_op: 0.0,
            allocs_per_op: 0.0,
            raw: String::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_best_picks_minimum_ns() {
        let repo = InMemoryBenchmarkRepository::new();
        repo.append(&sample(1, 900.0)).await.unwrap();
        repo.append(&sample(1, 700.0)).await.unwrap();
        repo.append(&sample(1, 800.0)).await.unwrap();
        repo.append(&sample(2, 100.0)).await.unwrap();

        let best = repo.best(1).await.unwrap().unwrap();
        assert_eq!(best.ns_per_op, 700.0);
        assert_eq!(best.id, Some(2));
    }

    #[tokio::test]
    async fn test_best_tie_goes_to_earliest() {
        let repo = InMemoryBenchmarkRepository::new();
        repo.append(&sample(1, 500.0)).await.unwrap();
        repo.append(&sample(1, 500.0)).await.unwrap();

        let best = repo.best(1).await.unwrap().unwrap();
        assert_eq!(best.id, Some(1));
    }

    #[tokio::test]
    async fn test_history_most_recent_first() {
        let repo = InMemoryBenchmarkRepository::new();
        repo.append(&sample(1, 900.0)).await.unwrap();
        repo.append(&sample(1, 800.0)).await.unwrap();

        let history = repo.history(1).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, Some(2));
        assert_eq!(history[1].id, Some(1));
    }

    #[tokio::test]
    async fn test_problem_repository_insert_and_find() {
        let repo = InMemoryProblemRepository::new();
        let id = repo.insert("two-sum", "Two Sum", "easy", "arrays").await.unwrap();

        let found = repo.find(id).await.unwrap().unwrap();
        assert_eq!(found.slug, "two-sum");
        assert!(repo.find(999).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
