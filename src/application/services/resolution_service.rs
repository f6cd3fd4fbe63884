//! Slug resolution: lookup, expiry enforcement, click tracking and redirect.

use axum::http::{HeaderValue, StatusCode};
use chrono::Utc;
use std::sync::Arc;

use crate::application::services::{AdvancedTracker, ClickLogger};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Status used for every successful resolution.
pub const REDIRECT_STATUS: StatusCode = StatusCode::TEMPORARY_REDIRECT;

/// What the HTTP layer should answer for a resolved slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectInstruction {
    pub status: StatusCode,
    pub location: HeaderValue,
}

/// Request metadata recorded with each click.
///
/// `client_ip` is the raw address; it is anonymized before any write.
#[derive(Debug, Clone, Default)]
pub struct ClickContext {
    pub client_ip: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

/// Orchestrates the redirect pipeline for a single request.
///
/// # Flow
///
/// 1. Look up the mapping by (trimmed) slug
/// 2. Absent or expired mappings resolve to [`AppError::NotFound`]
/// 3. Compose the UTM-decorated destination as a `Location` value
/// 4. Log the click and, if enabled, record advanced tracking
/// 5. Return a 307 [`RedirectInstruction`]
///
/// Analytics writes in step 3 run concurrently and their failures are logged
/// and counted, never returned: a valid, unexpired mapping always redirects.
pub struct ResolutionService {
    mappings: Arc<dyn MappingRepository>,
    click_logger: ClickLogger,
    tracker: Option<AdvancedTracker>,
}

impl ResolutionService {
    /// Creates a new resolution service.
    ///
    /// Pass `None` as `tracker` to disable advanced tracking.
    pub fn new(
        mappings: Arc<dyn MappingRepository>,
        click_logger: ClickLogger,
        tracker: Option<AdvancedTracker>,
    ) -> Self {
        Self {
            mappings,
            click_logger,
            tracker,
        }
    }

    /// Resolves `slug` into a redirect and records the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug is empty, unknown or expired.
    /// Returns [`AppError::Persistence`] if the lookup itself fails.
    /// Returns [`AppError::Internal`] if the destination cannot be sent as a
    /// `Location` header; no click is recorded in that case.
    pub async fn resolve(
        &self,
        slug: &str,
        context: &ClickContext,
    ) -> Result<RedirectInstruction, AppError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(not_found());
        }

        let mapping = match self.mappings.find_by_slug(slug).await? {
            Some(mapping) if mapping.is_resolvable_at(Utc::now()) => mapping,
            Some(_) => {
                tracing::debug!(slug, "Mapping expired");
                metrics::counter!("redirect_not_found_total").increment(1);
                return Err(not_found());
            }
            None => {
                tracing::debug!(slug, "Mapping not found");
                metrics::counter!("redirect_not_found_total").increment(1);
                return Err(not_found());
            }
        };

        let location = HeaderValue::from_str(&mapping.redirect_url()).map_err(|_| {
            AppError::internal(format!("Redirect target is not a valid header: {slug}"))
        })?;

        self.record_analytics(slug, context).await;

        metrics::counter!("redirects_total").increment(1);

        Ok(RedirectInstruction {
            status: REDIRECT_STATUS,
            location,
        })
    }

    /// Runs click logging and advanced tracking; reports, then drops, failures.
    async fn record_analytics(&self, slug: &str, context: &ClickContext) {
        let referrer = context.referrer.as_deref();
        let user_agent = context.user_agent.as_deref();

        let log_click = self
            .click_logger
            .log_click(slug, &context.client_ip, referrer, user_agent);

        let track = async {
            match &self.tracker {
                Some(tracker) => tracker
                    .record_first_click(slug, &context.client_ip, user_agent)
                    .await
                    .map(Some),
                None => Ok(None),
            }
        };

        let (logged, tracked) = tokio::join!(log_click, track);

        if let Err(e) = logged {
            metrics::counter!("click_log_failures_total").increment(1);
            tracing::warn!(slug, error = %e, "Failed to log click");
        }

        match tracked {
            Ok(Some(tracking_id)) => {
                tracing::debug!(slug, tracking_id = %tracking_id, "Advanced tracking recorded")
            }
            Ok(None) => {}
            Err(e) => {
                metrics::counter!("advanced_tracking_failures_total").increment(1);
                tracing::warn!(slug, error = %e, "Failed to record advanced tracking");
            }
        }
    }
}

fn not_found() -> AppError {
    AppError::not_found("URL not found")
}
