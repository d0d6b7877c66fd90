mod benchmark_repository;
mod problem_repository;
mod progress_repository;

pub use benchmark_repository::SqliteBenchmarkRepository;
pub use problem_repository::SqliteProblemRepository;
pub use progress_repository::SqliteProgressRepository;

use chrono::{DateTime, TimeZone, Utc};

/// Unix seconds → UTC timestamp. Stored values always map to a single
/// instant; an out-of-range value falls back to the epoch floor rather than
/// panicking.
pub(crate) fn ts_from_unix(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
