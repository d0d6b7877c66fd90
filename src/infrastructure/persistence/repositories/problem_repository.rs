use super::ts_from_unix;
use crate::domain::errors::TrackError;
use crate::domain::problem::{Difficulty, Problem};
use crate::domain::repositories::ProblemRepository;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use std::str::FromStr;

pub struct SqliteProblemRepository {
    pool: SqlitePool,
}

impl SqliteProblemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<Problem, TrackError> {
        let difficulty_str: String = row.try_get("difficulty")?;
        let difficulty = Difficulty::from_str(&difficulty_str)
            .map_err(|e| TrackError::validation(e.to_string()))?;

        Ok(Problem {
            id: row.try_get("id")?,
            slug: row.try_get("slug")?,
            title: row.try_get("title")?,
            difficulty,
            topic: row.try_get("topic")?,
            created_at: ts_from_unix(row.try_get("created_at")?),
        })
    }
}

#[async_trait]
impl ProblemRepository for SqliteProblemRepository {
    async fn find(&self, id: i64) -> Result<Option<Problem>, TrackError> {
        let row = sqlx::query("SELECT * FROM problems WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Problem>, TrackError> {
        let row = sqlx::query("SELECT * FROM problems WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Problem>, TrackError> {
        let rows = sqlx::query("SELECT * FROM problems ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn insert(
        &self,
        slug: &str,
        title: &str,
        difficulty: &str,
        topic: &str,
    ) -> Result<i64, TrackError> {
        let result = sqlx::query(
            r#"
            INSERT INTO problems (slug, title, difficulty, topic, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(slug)
        .bind(title)
        .bind(difficulty)
        .bind(topic)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn count(&self) -> Result<i64, TrackError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM problems")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
