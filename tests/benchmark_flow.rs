//! End-to-end tests for the benchmark path: parse → compare → persist,
//! plus best-sample selection, against a real SQLite database.

use katatrack::application::benchmarking::BenchmarkService;
use katatrack::domain::benchmark::BenchmarkSample;
use katatrack::domain::errors::TrackError;
use katatrack::domain::repositories::{BenchmarkRepository, ProblemRepository};
use katatrack::infrastructure::persistence::repositories::{
    SqliteBenchmarkRepository, SqliteProblemRepository,
};
use katatrack::infrastructure::persistence::{Database, seed};
use chrono::Utc;
use std::sync::Arc;

fn temp_db_url(tag: &str) -> String {
    let path = std::env::temp_dir().join(format!(
        "katatrack_bench_{}_{}.db",
        std::process::id(),
        tag
    ));
    let _ = std::fs::remove_file(&path);
    format!("sqlite://{}", path.display())
}

async fn setup(tag: &str) -> (BenchmarkService, Arc<SqliteBenchmarkRepository>, i64) {
    let db = Database::new(&temp_db_url(tag)).await.unwrap();
    let problems = Arc::new(SqliteProblemRepository::new(db.pool.clone()));
    let id = problems
        .insert("two-sum", "Two Sum", "easy", "arrays")
        .await
        .unwrap();
    let benchmarks = Arc::new(SqliteBenchmarkRepository::new(db.pool.clone()));
    let service = BenchmarkService::new(problems, benchmarks.clone());
    (service, benchmarks, id)
}

fn sample(problem_id: i64, ns: f64) -> BenchmarkSample {
    BenchmarkSample {
        id: None,
        problem_id,
        name: "TwoSum".to_string(),
        iterations: 1_000_000,
        ns_per_op: ns,
        bytes_per_op: 512.0,
        allocs_per_op: 5.0,
        raw: format!("BenchmarkTwoSum-8 1000000 {} ns/op", ns),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn first_sample_is_new_best_with_zero_deltas() {
    let (service, _, id) = setup("first").await;

    let (sample, result) = service
        .record(id, "BenchmarkTwoSum-8 1000000 1234 ns/op 512 B/op 5 allocs/op")
        .await
        .unwrap();

    assert!(result.is_new_best);
    assert_eq!(result.time_delta_pct, 0.0);
    assert_eq!(result.memory_delta_pct, 0.0);
    assert_eq!(result.alloc_delta_pct, 0.0);
    assert_eq!(sample.name, "TwoSum");
    assert_eq!(sample.iterations, 1_000_000);
    assert_eq!(sample.ns_per_op, 1234.0);
    assert_eq!(sample.bytes_per_op, 512.0);
    assert_eq!(sample.allocs_per_op, 5.0);
    assert!(sample.raw.contains("BenchmarkTwoSum-8"));
}

#[tokio::test]
async fn improvement_and_regression_deltas() {
    let (service, _, id) = setup("deltas").await;

    service
        .record(id, "BenchmarkTwoSum-8 1000000 1000 ns/op 512 B/op 5 allocs/op")
        .await
        .unwrap();

    let (_, improved) = service
        .record(id, "BenchmarkTwoSum-8 1200000 800 ns/op 512 B/op 5 allocs/op")
        .await
        .unwrap();
    assert_eq!(improved.time_delta_pct, -20.0);
    assert!(improved.is_new_best);

    // Baseline is now 800; a 1200 run is a +50% regression against it.
    let (_, regressed) = service
        .record(id, "BenchmarkTwoSum-8 900000 1200 ns/op 512 B/op 5 allocs/op")
        .await
        .unwrap();
    assert_eq!(regressed.time_delta_pct, 50.0);
    assert!(!regressed.is_new_best);
}

#[tokio::test]
async fn best_is_minimum_ns_with_earliest_tie_break() {
    let (_, benchmarks, id) = setup("best").await;

    benchmarks.append(&sample(id, 900.0)).await.unwrap();
    let tie_first = benchmarks.append(&sample(id, 700.0)).await.unwrap();
    benchmarks.append(&sample(id, 800.0)).await.unwrap();
    benchmarks.append(&sample(id, 700.0)).await.unwrap();

    let best = benchmarks.best(id).await.unwrap().unwrap();
    assert_eq!(best.ns_per_op, 700.0);
    assert_eq!(best.id, Some(tie_first));
}

#[tokio::test]
async fn best_is_none_without_samples() {
    let (service, _, id) = setup("empty_best").await;
    assert!(service.best(id).await.unwrap().is_none());
}

#[tokio::test]
async fn history_is_most_recent_first() {
    let (service, benchmarks, id) = setup("history").await;

    let a = benchmarks.append(&sample(id, 900.0)).await.unwrap();
    let b = benchmarks.append(&sample(id, 700.0)).await.unwrap();
    let c = benchmarks.append(&sample(id, 800.0)).await.unwrap();

    let history = service.history(id).await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].id, Some(c));
    assert_eq!(history[1].id, Some(b));
    assert_eq!(history[2].id, Some(a));
}

#[tokio::test]
async fn unparseable_output_persists_nothing() {
    let (service, benchmarks, id) = setup("parse_err").await;

    let err = service.record(id, "no benchmark output here").await;
    assert!(matches!(err, Err(TrackError::BenchParse { .. })));
    assert!(benchmarks.history(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_problem_is_rejected() {
    let (service, _, _) = setup("unknown").await;

    let err = service
        .record(12345, "BenchmarkTwoSum-8 1000000 1234 ns/op")
        .await;
    assert!(matches!(err, Err(TrackError::ProblemNotFound { id: 12345 })));
}

#[tokio::test]
async fn catalog_seeding_is_idempotent() {
    let db = Database::new(&temp_db_url("seed")).await.unwrap();
    let problems = SqliteProblemRepository::new(db.pool.clone());

    let first = seed::seed_catalog(&problems).await.unwrap();
    assert!(first > 0);
    let total = problems.count().await.unwrap();

    let second = seed::seed_catalog(&problems).await.unwrap();
    assert_eq!(second, 0);
    assert_eq!(problems.count().await.unwrap(), total);

    let two_sum = problems.find_by_slug("two-sum").await.unwrap().unwrap();
    assert_eq!(two_sum.title, "Two Sum");
}
