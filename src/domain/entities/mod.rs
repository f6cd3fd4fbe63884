//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`UrlMapping`] - A slug resolving to a UTM-decorated destination
//! - [`ClickLog`] - One anonymized click on a resolved slug
//! - [`TrackingRecord`] - Enriched per-visitor tracking data
//!
//! Creation inputs use separate `New*` structs.

pub mod click_log;
pub mod tracking_record;
pub mod url_mapping;

pub use click_log::{ClickLog, NewClickLog};
pub use tracking_record::{NewTrackingRecord, TrackingRecord};
pub use url_mapping::{NewUrlMapping, UrlMapping, UtmParams};
