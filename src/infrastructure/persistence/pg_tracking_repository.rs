//! PostgreSQL implementation of the tracking repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewTrackingRecord, TrackingRecord};
use crate::domain::repositories::TrackingRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct TrackingRow {
    id: i64,
    tracking_id: String,
    slug: String,
    ip_network: String,
    country_code: String,
    browser_family: String,
    os_family: String,
    device_type: String,
    first_click_time: DateTime<Utc>,
    click_count: i32,
}

impl From<TrackingRow> for TrackingRecord {
    fn from(r: TrackingRow) -> Self {
        TrackingRecord {
            id: r.id,
            tracking_id: r.tracking_id,
            slug: r.slug,
            ip_network: r.ip_network,
            country_code: r.country_code,
            browser_family: r.browser_family,
            os_family: r.os_family,
            device_type: r.device_type,
            first_click_time: r.first_click_time,
            click_count: r.click_count,
        }
    }
}

/// PostgreSQL repository for advanced tracking records.
///
/// The click counter is incremented in a single `UPDATE`, so concurrent repeat
/// clicks are serialized by the database.
pub struct PgTrackingRepository {
    pool: Arc<PgPool>,
}

impl PgTrackingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackingRepository for PgTrackingRepository {
    async fn insert(&self, new_record: NewTrackingRecord) -> Result<TrackingRecord, AppError> {
        let row = sqlx::query_as::<_, TrackingRow>(
            r#"
            INSERT INTO tracking_metadata
                (tracking_id, slug, ip_network, country_code, browser_family,
                 os_family, device_type, first_click_time, click_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1)
            RETURNING id, tracking_id, slug, ip_network, country_code, browser_family,
                      os_family, device_type, first_click_time, click_count
            "#,
        )
        .bind(&new_record.tracking_id)
        .bind(&new_record.slug)
        .bind(&new_record.ip_network)
        .bind(&new_record.country_code)
        .bind(&new_record.browser_family)
        .bind(&new_record.os_family)
        .bind(&new_record.device_type)
        .bind(new_record.first_click_time)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn increment_click_count(&self, tracking_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE tracking_metadata
            SET click_count = click_count + 1
            WHERE tracking_id = $1
            "#,
        )
        .bind(tracking_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &str,
    ) -> Result<Option<TrackingRecord>, AppError> {
        let row = sqlx::query_as::<_, TrackingRow>(
            r#"
            SELECT id, tracking_id, slug, ip_network, country_code, browser_family,
                   os_family, device_type, first_click_time, click_count
            FROM tracking_metadata
            WHERE tracking_id = $1
            "#,
        )
        .bind(tracking_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(TrackingRecord::from))
    }
}
