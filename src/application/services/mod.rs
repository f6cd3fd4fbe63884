//! Business logic services for the application layer.

pub mod advanced_tracker;
pub mod click_logger;
pub mod mapping_service;
pub mod resolution_service;

pub use advanced_tracker::{AdvancedTracker, NetworkInfo};
pub use click_logger::ClickLogger;
pub use mapping_service::MappingService;
pub use resolution_service::{ClickContext, RedirectInstruction, ResolutionService};
