use thiserror::Error;

/// Errors surfaced by the tracking and benchmarking core.
///
/// Every failing operation returns one of these; nothing is swallowed or
/// retried inside the core. The tracker additionally guarantees that any
/// error observed mid-transaction rolls the whole unit of work back.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("problem not found: id {id}")]
    ProblemNotFound { id: i64 },

    #[error("no benchmark result line found: {reason}")]
    BenchParse { reason: String },

    #[error("storage operation failed: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("invalid argument: {reason}")]
    Validation { reason: String },
}

impl TrackError {
    pub fn validation(reason: impl Into<String>) -> Self {
        TrackError::Validation {
            reason: reason.into(),
        }
    }

    pub fn bench_parse(reason: impl Into<String>) -> Self {
        TrackError::BenchParse {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_formatting() {
        let err = TrackError::ProblemNotFound { id: 42 };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_validation_formatting() {
        let err = TrackError::validation("tests_passed 5 exceeds tests_total 3");
        assert!(err.to_string().contains("tests_passed 5"));
    }
}
