//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx
//! runtime-checked queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgMappingRepository`] - Slug lookups and mapping creation
//! - [`PgClickRepository`] - Click log inserts and counts
//! - [`PgTrackingRepository`] - Tracking records and click-count increments

pub mod pg_click_repository;
pub mod pg_mapping_repository;
pub mod pg_tracking_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_mapping_repository::PgMappingRepository;
pub use pg_tracking_repository::PgTrackingRepository;
