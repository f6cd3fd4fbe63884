//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping, UtmParams};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    slug: String,
    destination_url: String,
    utm_source: Option<String>,
    utm_medium: Option<String>,
    utm_campaign: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(r: MappingRow) -> Self {
        UrlMapping {
            id: r.id,
            slug: r.slug,
            destination_url: r.destination_url,
            utm: UtmParams {
                source: r.utm_source,
                medium: r.utm_medium,
                campaign: r.utm_campaign,
            },
            expires_at: r.expires_at,
            created_at: r.created_at,
        }
    }
}

/// PostgreSQL repository for URL mappings.
///
/// Slug uniqueness is enforced by the `url_mappings_slug_key` constraint.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, slug, destination_url, utm_source, utm_medium, utm_campaign,
                   expires_at, created_at
            FROM url_mappings
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO url_mappings
                (slug, destination_url, utm_source, utm_medium, utm_campaign, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, slug, destination_url, utm_source, utm_medium, utm_campaign,
                      expires_at, created_at
            "#,
        )
        .bind(&new_mapping.slug)
        .bind(&new_mapping.destination_url)
        .bind(non_empty(new_mapping.utm.source))
        .bind(non_empty(new_mapping.utm.medium))
        .bind(non_empty(new_mapping.utm.campaign))
        .bind(new_mapping.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
