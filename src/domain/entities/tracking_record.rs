//! Advanced tracking record keyed by a random tracking identifier.

use chrono::{DateTime, Utc};

/// Enriched per-visitor tracking data.
///
/// `country_code` is always empty: no geolocation source is wired in.
#[derive(Debug, Clone)]
pub struct TrackingRecord {
    pub id: i64,
    pub tracking_id: String,
    pub slug: String,
    pub ip_network: String,
    pub country_code: String,
    pub browser_family: String,
    pub os_family: String,
    pub device_type: String,
    pub first_click_time: DateTime<Utc>,
    pub click_count: i32,
}

/// Input data for the first observation of a tracking identifier.
#[derive(Debug, Clone)]
pub struct NewTrackingRecord {
    pub tracking_id: String,
    pub slug: String,
    pub ip_network: String,
    pub country_code: String,
    pub browser_family: String,
    pub os_family: String,
    pub device_type: String,
    pub first_click_time: DateTime<Utc>,
}

impl NewTrackingRecord {
    /// Materializes the persisted form with `click_count = 1`.
    pub fn into_record(self, id: i64) -> TrackingRecord {
        TrackingRecord {
            id,
            tracking_id: self.tracking_id,
            slug: self.slug,
            ip_network: self.ip_network,
            country_code: self.country_code,
            browser_family: self.browser_family,
            os_family: self.os_family,
            device_type: self.device_type,
            first_click_time: self.first_click_time,
            click_count: 1,
        }
    }
}
