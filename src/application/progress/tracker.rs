use crate::domain::errors::TrackError;
use crate::domain::progress::{ProgressRecord, SolutionAttempt};
use crate::infrastructure::persistence::Database;
use crate::infrastructure::persistence::repositories::ts_from_unix;
use chrono::Utc;
use sqlx::{Row, Sqlite, Transaction};
use tracing::{debug, info};

/// One tracked test-run outcome, as reported by the test harness.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub problem_id: i64,
    /// Reference to the submitted solution artifact.
    pub artifact: String,
    pub passed: bool,
    pub tests_passed: i64,
    pub tests_total: i64,
}

/// The transactional state-update engine.
///
/// `track_completion` is the only write path for progress state and the
/// attempt log. It runs as one SQLite transaction: either the progress
/// upsert and the attempt insert both land, or neither does. The store
/// handle is injected at construction; there is no global connection.
pub struct ProgressTracker {
    db: Database,
}

impl ProgressTracker {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Track one completion. Returns whether this call solved the problem
    /// for the first time.
    ///
    /// Fails with `ProblemNotFound` (before any write) if the id does not
    /// reference a catalog entry. Any failure on any step drops the
    /// transaction, which rolls back every write made inside it.
    pub async fn track_completion(
        &self,
        outcome: CompletionOutcome,
    ) -> Result<bool, TrackError> {
        let now = Utc::now();

        // Validate the outcome before touching the store at all.
        let attempt = SolutionAttempt::new(
            outcome.problem_id,
            outcome.passed,
            outcome.tests_passed,
            outcome.tests_total,
            &outcome.artifact,
            now,
        )?;

        let mut tx = self.db.pool.begin().await?;

        // 1. The problem must exist; fail fast with zero writes.
        let known: Option<i64> = sqlx::query_scalar("SELECT id FROM problems WHERE id = ?")
            .bind(outcome.problem_id)
            .fetch_optional(&mut *tx)
            .await?;
        if known.is_none() {
            return Err(TrackError::ProblemNotFound {
                id: outcome.problem_id,
            });
        }

        // 2-4. Fetch-or-zero the progress record and fold the completion in.
        let existing = Self::fetch_progress(&mut tx, outcome.problem_id).await?;
        let record_exists = existing.is_some();
        let mut record = existing.unwrap_or_else(|| ProgressRecord::zero(outcome.problem_id));

        let first_time_solved = record.apply_completion(outcome.passed, now);

        // 5. Persist the updated record and append the attempt row in the
        // same transaction.
        Self::store_progress(&mut tx, &record, record_exists).await?;
        Self::append_attempt(&mut tx, &attempt).await?;

        tx.commit().await?;

        if first_time_solved {
            info!(problem_id = outcome.problem_id, "Problem solved for the first time");
        } else {
            debug!(
                problem_id = outcome.problem_id,
                passed = outcome.passed,
                attempts = record.total_attempts,
                "Completion tracked"
            );
        }

        Ok(first_time_solved)
    }

    async fn fetch_progress(
        tx: &mut Transaction<'_, Sqlite>,
        problem_id: i64,
    ) -> Result<Option<ProgressRecord>, TrackError> {
        let row = sqlx::query("SELECT * FROM progress WHERE problem_id = ?")
            .bind(problem_id)
            .fetch_optional(&mut **tx)
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

    async fn store_progress(
        tx: &mut Transaction<'_, Sqlite>,
        record: &ProgressRecord,
        exists: bool,
    ) -> Result<(), TrackError> {
        if exists {
            sqlx::query(
                r#"
                UPDATE progress
                SET solved = ?, total_attempts = ?, first_solved_at = ?, last_attempted_at = ?
                WHERE problem_id = ?
                "#,
            )
            .bind(record.solved)
            .bind(record.total_attempts)
            .bind(record.first_solved_at.map(|t| t.timestamp()))
            .bind(record.last_attempted_at.map(|t| t.timestamp()))
            .bind(record.problem_id)
            .execute(&mut **tx)
            .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO progress
                (problem_id, solved, total_attempts, first_solved_at, last_attempted_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(record.problem_id)
            .bind(record.solved)
            .bind(record.total_attempts)
            .bind(record.first_solved_at.map(|t| t.timestamp()))
            .bind(record.last_attempted_at.map(|t| t.timestamp()))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn append_attempt(
        tx: &mut Transaction<'_, Sqlite>,
        attempt: &SolutionAttempt,
    ) -> Result<(), TrackError> {
        sqlx::query(
            r#"
            INSERT INTO attempts
            (problem_id, status, tests_passed, tests_total, artifact, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(attempt.problem_id)
        .bind(attempt.status.to_string())
        .bind(attempt.tests_passed)
        .bind(attempt.tests_total)
        .bind(&attempt.artifact)
        .bind(attempt.created_at.timestamp())
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
