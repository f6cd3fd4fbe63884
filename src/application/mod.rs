//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls and pure helpers; HTTP handlers and
//! the admin CLI call into them.
//!
//! # Available Services
//!
//! - [`services::ResolutionService`] - Slug lookup, expiry, analytics and redirect
//! - [`services::ClickLogger`] - Anonymized click persistence
//! - [`services::AdvancedTracker`] - Tracking ids and user-agent enrichment
//! - [`services::MappingService`] - Validated mapping creation (admin path)

pub mod services;
