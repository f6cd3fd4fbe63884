//! Anonymized click logging.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::{ClickLog, NewClickLog};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;
use crate::utils::ip_anonymizer::anonymize;

/// Persists one anonymized click event per resolved redirect.
pub struct ClickLogger {
    repository: Arc<dyn ClickRepository>,
}

impl ClickLogger {
    /// Creates a new click logger.
    pub fn new(repository: Arc<dyn ClickRepository>) -> Self {
        Self { repository }
    }

    /// Records a click.
    ///
    /// The raw client address is anonymized before it leaves this function and
    /// the event is timestamped with the current UTC time. An address that does
    /// not parse is stored as `NULL`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the write fails. Callers on the
    /// redirect path must report and discard this error.
    pub async fn log_click(
        &self,
        slug: &str,
        raw_ip: &str,
        referrer: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<ClickLog, AppError> {
        let anonymized_ip = Some(anonymize(raw_ip)).filter(|ip| !ip.is_empty());

        let new_click = NewClickLog {
            slug: slug.to_string(),
            anonymized_ip,
            clicked_at: Utc::now(),
            referrer: referrer.map(str::to_string),
            user_agent: user_agent.map(str::to_string),
        };

        self.repository.insert(new_click).await
    }

    /// Counts recorded clicks for a slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    pub async fn count_clicks(&self, slug: &str) -> Result<i64, AppError> {
        self.repository.count_by_slug(slug).await
    }
}
