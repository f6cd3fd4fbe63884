//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ClickLog, NewClickLog};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    slug: String,
    anonymized_ip: Option<String>,
    clicked_at: DateTime<Utc>,
    referrer: Option<String>,
    user_agent: Option<String>,
}

impl From<ClickRow> for ClickLog {
    fn from(r: ClickRow) -> Self {
        ClickLog {
            id: r.id,
            slug: r.slug,
            anonymized_ip: r.anonymized_ip,
            clicked_at: r.clicked_at,
            referrer: r.referrer,
            user_agent: r.user_agent,
        }
    }
}

/// PostgreSQL repository for append-only click logs.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert(&self, new_click: NewClickLog) -> Result<ClickLog, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO click_logs (slug, anonymized_ip, clicked_at, referrer, user_agent)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, slug, anonymized_ip, clicked_at, referrer, user_agent
            "#,
        )
        .bind(&new_click.slug)
        .bind(&new_click.anonymized_ip)
        .bind(new_click.clicked_at)
        .bind(&new_click.referrer)
        .bind(&new_click.user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn count_by_slug(&self, slug: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM click_logs WHERE slug = $1")
            .bind(slug)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
