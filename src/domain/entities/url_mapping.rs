//! URL mapping entity: a slug resolving to a destination with UTM attributes.

use chrono::{DateTime, Months, Utc};

use crate::utils::utm::compose_redirect_url;

/// Optional UTM campaign attributes attached to a mapping.
///
/// Empty strings are treated the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtmParams {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
}

impl UtmParams {
    pub fn new(
        source: Option<impl Into<String>>,
        medium: Option<impl Into<String>>,
        campaign: Option<impl Into<String>>,
    ) -> Self {
        Self {
            source: source.map(Into::into),
            medium: medium.map(Into::into),
            campaign: campaign.map(Into::into),
        }
    }

    /// Query parameters to set on the destination, in `source, medium, campaign`
    /// order. Absent and empty attributes are skipped.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("utm_source", self.source.as_deref()),
            ("utm_medium", self.medium.as_deref()),
            ("utm_campaign", self.campaign.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().next().is_none()
    }
}

/// A persisted slug → destination mapping.
#[derive(Debug, Clone)]
pub struct UrlMapping {
    pub id: i64,
    pub slug: String,
    pub destination_url: String,
    pub utm: UtmParams,
    /// `None` means the expiry was never set; such mappings never expire.
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Returns true while the mapping may be resolved at `now`.
    ///
    /// Expiry is strict: a mapping whose `expires_at == now` is no longer resolvable.
    pub fn is_resolvable_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }

    /// Builds the UTM-decorated redirect target.
    pub fn redirect_url(&self) -> String {
        compose_redirect_url(&self.destination_url, &self.utm)
    }
}

/// Input for creating a mapping through the admin path.
#[derive(Debug, Clone)]
pub struct NewUrlMapping {
    pub slug: String,
    pub destination_url: String,
    pub utm: UtmParams,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewUrlMapping {
    /// Fills an unset expiry with `now + 1 year`.
    pub fn with_default_expiry(mut self, now: DateTime<Utc>) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = now.checked_add_months(Months::new(12));
        }
        self
    }
}
