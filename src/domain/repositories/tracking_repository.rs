//! Repository trait for advanced tracking records.

use crate::domain::entities::{NewTrackingRecord, TrackingRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Store of per-visitor tracking records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTrackingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackingRepository: Send + Sync {
    /// Inserts a first-observation record with `click_count = 1`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the tracking id already exists.
    /// Returns [`AppError::Persistence`] on database errors.
    async fn insert(&self, new_record: NewTrackingRecord) -> Result<TrackingRecord, AppError>;

    /// Atomically increments `click_count` for a tracking id.
    ///
    /// Returns `Ok(false)` if no record matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn increment_click_count(&self, tracking_id: &str) -> Result<bool, AppError>;

    /// Finds a record by tracking id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn find_by_tracking_id(
        &self,
        tracking_id: &str,
    ) -> Result<Option<TrackingRecord>, AppError>;
}
