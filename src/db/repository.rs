//! Database repository for the topics and strikes tables.
//!
//! Every query is parameterized. Each operation checks a connection out of
//! the pool, performs one query (or a lookup+mutation pair) and auto-commits;
//! no transaction spans two logical operations.

use sqlx::{AnyPool, Row};

use crate::errors::AppError;
use crate::models::{normalize_name, Strike, Topic};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: AnyPool,
}

impl Repository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    // ==================== TOPIC OPERATIONS ====================

    /// Look up a topic by name. The name is normalized before the query, so
    /// `"Linear Algebra"` finds the row stored as `"linear algebra"`.
    pub async fn find_topic(&self, name: &str) -> Result<Option<Topic>, AppError> {
        let name = normalize_name(name);
        let row = sqlx::query("SELECT topic, count FROM topics WHERE topic = ?")
            .bind(&name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(topic_from_row))
    }

    /// Insert a new topic with a zero count.
    ///
    /// The lookup-then-insert pair mirrors the user-facing contract: a topic
    /// that already exists is a `Duplicate` error, not a driver error.
    pub async fn insert_topic(&self, name: &str) -> Result<Topic, AppError> {
        let name = normalize_name(name);

        if self.find_topic(&name).await?.is_some() {
            return Err(AppError::Duplicate(format!(
                "Topic '{}' already exists",
                name
            )));
        }

        sqlx::query("INSERT INTO topics (topic, count) VALUES (?, ?)")
            .bind(&name)
            .bind(0i64)
            .execute(&self.pool)
            .await?;

        Ok(Topic { name, count: 0 })
    }

    /// Delete a topic by name.
    pub async fn delete_topic(&self, name: &str) -> Result<(), AppError> {
        let name = normalize_name(name);

        let result = sqlx::query("DELETE FROM topics WHERE topic = ?")
            .bind(&name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("No topic '{}' found", name)));
        }

        Ok(())
    }

    /// List all topics, most used first.
    pub async fn list_topics(&self) -> Result<Vec<Topic>, AppError> {
        let rows = sqlx::query("SELECT topic, count FROM topics ORDER BY count DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(topic_from_row).collect())
    }

    // ==================== STRIKE OPERATIONS ====================

    /// List all strikes, most struck first. The strikes table has no mutation
    /// path in this system; the moderation bot owns the counts.
    pub async fn list_strikes(&self) -> Result<Vec<Strike>, AppError> {
        let rows = sqlx::query("SELECT user_id, count FROM strikes ORDER BY count DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(strike_from_row).collect())
    }
}

// Helper functions for row conversion

fn topic_from_row(row: &sqlx::any::AnyRow) -> Topic {
    Topic {
        name: row.get("topic"),
        count: row.get("count"),
    }
}

fn strike_from_row(row: &sqlx::any::AnyRow) -> Strike {
    Strike {
        user_id: row.get("user_id"),
        count: row.get("count"),
    }
}
