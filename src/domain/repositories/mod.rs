//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Services receive them as
//! `Arc<dyn …>` handles, and mock implementations are generated via
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`MappingRepository`] - Slug lookups and mapping creation
//! - [`ClickRepository`] - Append-only click logs
//! - [`TrackingRepository`] - Advanced tracking records

pub mod click_repository;
pub mod mapping_repository;
pub mod tracking_repository;

pub use click_repository::ClickRepository;
pub use mapping_repository::MappingRepository;
pub use tracking_repository::TrackingRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
#[cfg(test)]
pub use tracking_repository::MockTrackingRepository;
