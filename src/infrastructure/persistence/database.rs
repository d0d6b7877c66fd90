use anyhow::{Context, Result};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::info;

/// Shared database handle. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn new(db_url: &str) -> Result<Self> {
        // Ensure the directory exists if it's a file path
        if let Some(path_part) = db_url.strip_prefix("sqlite://") {
            let path = Path::new(path_part);
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create database directory")?;
            }
        }

        let options = SqliteConnectOptions::from_str(db_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        info!("Connected to database: {}", db_url);

        let db = Self { pool };
        db.init().await?;

        Ok(db)
    }

    /// Initialize database schema
    async fn init(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        // 1. Problem catalog (immutable after seeding)
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS problems (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                slug TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                difficulty TEXT NOT NULL CHECK (difficulty IN ('easy', 'medium', 'hard')),
                topic TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create problems table")?;

        // 2. Per-problem progress state, exactly one row per problem
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS progress (
                problem_id INTEGER PRIMARY KEY REFERENCES problems(id),
                solved INTEGER NOT NULL DEFAULT 0,
                total_attempts INTEGER NOT NULL DEFAULT 0,
                first_solved_at INTEGER,
                last_attempted_at INTEGER
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create progress table")?;

        // 3. Append-only attempt log
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS attempts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                problem_id INTEGER NOT NULL REFERENCES problems(id),
                status TEXT NOT NULL CHECK (status IN ('passed', 'failed')),
                tests_passed INTEGER NOT NULL,
                tests_total INTEGER NOT NULL,
                artifact TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_attempts_problem_time
            ON attempts (problem_id, created_at);
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create attempts table")?;

        // 4. Append-only benchmark sample log
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS benchmark_samples (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                problem_id INTEGER NOT NULL REFERENCES problems(id),
                name TEXT NOT NULL,
                iterations INTEGER NOT NULL,
                ns_per_op REAL NOT NULL,
                bytes_per_op REAL NOT NULL,
                allocs_per_op REAL NOT NULL,
                raw TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_bench_problem_ns
            ON benchmark_samples (problem_id, ns_per_op);
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create benchmark_samples table")?;

        info!("Database schema initialized.");
        Ok(())
    }
}
