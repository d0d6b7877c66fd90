use super::ts_from_unix;
use crate::domain::errors::TrackError;
use crate::domain::progress::{AttemptStatus, ProgressRecord, ProgressSummary, SolutionAttempt};
use crate::domain::repositories::ProgressRepository;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

/// Read side of progress state. All writes go through the tracker's
/// transaction, never through this repository.
pub struct SqliteProgressRepository {
    pool: SqlitePool,
}

impl SqliteProgressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressRepository for SqliteProgressRepository {
    async fn get(&self, problem_id: i64) -> Result<Option<ProgressRecord>, TrackError> {
        let row = sqlx::query("SELECT * FROM progress WHERE problem_id = ?")
            .bind(problem_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            Ok(Some(ProgressRecord {
                problem_id: row.try_get("problem_id")?,
                solved: row.try_get("solved")?,
                total_attempts: row.try_get("total_attempts")?,
                first_solved_at: row
                    .try_get::<Option<i64>, _>("first_solved_at")?
                    .map(ts_from_unix),
                last_attempted_at: row
                    .try_get::<Option<i64>, _>("last_attempted_at")?
                    .map(ts_from_unix),
            }))
        } else {
            Ok(None)
        }
    }

    async fn attempts(&self, problem_id: i64) -> Result<Vec<SolutionAttempt>, TrackError> {
        let rows = sqlx::query(
            "SELECT * FROM attempts WHERE problem_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(problem_id)
        .fetch_all(&self.pool)
        .await?;

        let mut attempts = Vec::new();
        for row in rows {
            let status_str: String = row.try_get("status")?;
            let status = AttemptStatus::from_str(&status_str)
                .map_err(|e| TrackError::validation(e.to_string()))?;

            attempts.push(SolutionAttempt {
                id: Some(row.try_get("id")?),
                problem_id: row.try_get("problem_id")?,
                status,
                tests_passed: row.try_get("tests_passed")?,
                tests_total: row.try_get("tests_total")?,
                artifact: row.try_get("artifact")?,
                created_at: ts_from_unix(row.try_get("created_at")?),
            });
        }
        Ok(attempts)
    }

    async fn summary(&self) -> Result<ProgressSummary, TrackError> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM problems) AS total_problems,
                COALESCE(SUM(CASE WHEN solved THEN 1 ELSE 0 END), 0) AS solved,
                COALESCE(SUM(CASE WHEN NOT solved THEN 1 ELSE 0 END), 0) AS attempted_unsolved,
                COALESCE(SUM(total_attempts), 0) AS total_attempts
            FROM progress
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(ProgressSummary {
            total_problems: row.try_get("total_problems")?,
            solved: row.try_get("solved")?,
            attempted_unsolved: row.try_get("attempted_unsolved")?,
            total_attempts: row.try_get("total_attempts")?,
        })
    }
}
