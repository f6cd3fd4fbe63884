//! Repository trait for click logs.

use crate::domain::entities::{ClickLog, NewClickLog};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only store of click events.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends one click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn insert(&self, new_click: NewClickLog) -> Result<ClickLog, AppError>;

    /// Counts recorded clicks for a slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn count_by_slug(&self, slug: &str) -> Result<i64, AppError>;
}
