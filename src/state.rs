//! Shared state injected into the HTTP handlers of each tier.

use std::sync::Arc;

use crate::application::services::{MappingService, ResolutionService};
use crate::edge::Forwarder;

/// Resolution tier state. Cheap to clone: every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub resolution_service: Arc<ResolutionService>,
    pub mapping_service: Arc<MappingService>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for the client address.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        resolution_service: Arc<ResolutionService>,
        mapping_service: Arc<MappingService>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            resolution_service,
            mapping_service,
            behind_proxy,
        }
    }
}

/// Edge tier state.
#[derive(Clone)]
pub struct EdgeState {
    pub forwarder: Arc<Forwarder>,
}

impl EdgeState {
    pub fn new(forwarder: Arc<Forwarder>) -> Self {
        Self { forwarder }
    }
}
