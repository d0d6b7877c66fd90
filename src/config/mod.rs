//! Configuration module for katatrack.
//!
//! Structured configuration loading from environment variables. A `.env`
//! file is honored when present (loaded in `main` via dotenvy).

use anyhow::Result;
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://katatrack.db";
const DEFAULT_REPORT_DIR: &str = "reports";

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string, e.g. `sqlite://katatrack.db` or
    /// `sqlite::memory:`.
    pub database_url: String,
    /// Directory where JSON benchmark reports are written.
    pub report_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("KATATRACK_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let report_dir =
            env::var("KATATRACK_REPORT_DIR").unwrap_or_else(|_| DEFAULT_REPORT_DIR.to_string());

        if database_url.is_empty() {
            anyhow::bail!("KATATRACK_DATABASE_URL must not be empty");
        }

        Ok(Self {
            database_url,
            report_dir,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            report_dir: DEFAULT_REPORT_DIR.to_string(),
        }
    }
}
