use super::ts_from_unix;
use crate::domain::benchmark::BenchmarkSample;
use crate::domain::errors::TrackError;
use crate::domain::repositories::BenchmarkRepository;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

pub struct SqliteBenchmarkRepository {
    pool: SqlitePool,
}

impl SqliteBenchmarkRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<BenchmarkSample, TrackError> {
        Ok(BenchmarkSample {
            id: Some(row.try_get("id")?),
            problem_id: row.try_get("problem_id")?,
            name: row.try_get("name")?,
            iterations: row.try_get("iterations")?,
            ns_per_op: row.try_get("ns_per_op")?,
            bytes_per_op: row.try_get("bytes_per_op")?,
            allocs_per_op: row.try_get("allocs_per_op")?,
            raw: row.try_get("raw")?,
            created_at: ts_from_unix(row.try_get("created_at")?),
        })
    }
}

#[async_trait]
impl BenchmarkRepository for SqliteBenchmarkRepository {
    async fn append(&self, sample: &BenchmarkSample) -> Result<i64, TrackError> {
        let result = sqlx::query(
            r#"
            INSERT INTO benchmark_samples
            (problem_id, name, iterations, ns_per_op, bytes_per_op, allocs_per_op, raw, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(sample.problem_id)
        .bind(&sample.name)
        .bind(sample.iterations)
        .bind(sample.ns_per_op)
        .bind(sample.bytes_per_op)
        .bind(sample.allocs_per_op)
        .bind(&sample.raw)
        .bind(sample.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn best(&self, problem_id: i64) -> Result<Option<BenchmarkSample>, TrackError> {
        // Ties on ns_per_op resolve to the earliest recorded sample, so the
        // first run to post a time stays the record holder.
        let row = sqlx::query(
            r#"
            SELECT * FROM benchmark_samples
            WHERE problem_id = ?
            ORDER BY ns_per_op ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(problem_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn history(&self, problem_id: i64) -> Result<Vec<BenchmarkSample>, TrackError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM benchmark_samples
            WHERE problem_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(problem_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }
}
