use crate::domain::errors::TrackError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a single tracked test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptStatus {
    Passed,
    Failed,
}

impl AttemptStatus {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            AttemptStatus::Passed
        } else {
            AttemptStatus::Failed
        }
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptStatus::Passed => write!(f, "passed"),
            AttemptStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for AttemptStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passed" => Ok(AttemptStatus::Passed),
            "failed" => Ok(AttemptStatus::Failed),
            _ => anyhow::bail!("Invalid attempt status: {}. Must be 'passed' or 'failed'", s),
        }
    }
}

/// The single mutable per-problem state.
///
/// Invariants, enforced by [`ProgressRecord::apply_completion`] and the
/// tracker's transaction:
/// - `solved` is monotonic: once true it is never reset
/// - `first_solved_at` is written exactly once, on the unsolved→solved
///   transition, and never touched again
/// - `total_attempts` grows by exactly 1 per tracked completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub problem_id: i64,
    pub solved: bool,
    pub total_attempts: i64,
    pub first_solved_at: Option<DateTime<Utc>>,
    pub last_attempted_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// Zero-value record used when a problem has never been attempted.
    pub fn zero(problem_id: i64) -> Self {
        Self {
            problem_id,
            solved: false,
            total_attempts: 0,
            first_solved_at: None,
            last_attempted_at: None,
        }
    }

    /// Fold one completion into the record.
    ///
    /// Returns whether this completion is the first-ever solve. The counter
    /// and `last_attempted_at` always move; `solved`/`first_solved_at` only
    /// on the unsolved→solved transition and never afterwards, pass or fail.
    pub fn apply_completion(&mut self, passed: bool, now: DateTime<Utc>) -> bool {
        let first_time_solved = passed && !self.solved;

        self.total_attempts += 1;
        self.last_attempted_at = Some(now);

        if first_time_solved {
            self.solved = true;
            self.first_solved_at = Some(now);
        }

        first_time_solved
    }
}

/// One immutable log entry per tracked completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionAttempt {
    pub id: Option<i64>,
    pub problem_id: i64,
    pub status: AttemptStatus,
    pub tests_passed: i64,
    pub tests_total: i64,
    /// Reference to the submitted artifact (source file path, commit, ...).
    pub artifact: String,
    pub created_at: DateTime<Utc>,
}

impl SolutionAttempt {
    /// Build a validated attempt record.
    ///
    /// Validation and timestamp defaulting happen right here, at the point
    /// of construction, rather than in persistence-layer hooks.
    pub fn new(
        problem_id: i64,
        passed: bool,
        tests_passed: i64,
        tests_total: i64,
        artifact: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, TrackError> {
        if tests_passed < 0 || tests_total < 0 {
            return Err(TrackError::validation("test counts must be non-negative"));
        }
        if tests_passed > tests_total {
            return Err(TrackError::validation(format!(
                "tests_passed {} exceeds tests_total {}",
                tests_passed, tests_total
            )));
        }

        Ok(Self {
            id: None,
            problem_id,
            status: AttemptStatus::from_passed(passed),
            tests_passed,
            tests_total,
            artifact: artifact.to_string(),
            created_at: now,
        })
    }
}

/// Aggregate counts across the whole catalog, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_problems: i64,
    pub solved: i64,
    pub attempted_unsolved: i64,
    pub total_attempts: i64,
}
