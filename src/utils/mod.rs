//! Pure helpers used by the redirect and tracking pipeline.
//!
//! - [`utm`] - Mapping validation and UTM redirect URL composition
//! - [`ip_anonymizer`] - IPv4 /24 and IPv6 /48 masking
//! - [`user_agent`] - Rule-table user-agent classification
//! - [`tracking_id`] - Random tracking identifier generation
//! - [`client_ip`] - Client address extraction from request metadata

pub mod client_ip;
pub mod ip_anonymizer;
pub mod tracking_id;
pub mod user_agent;
pub mod utm;
