//! Router construction for both tiers.
//!
//! # Resolution tier
//!
//! - `GET /r/{slug}` - Resolve, record the click, 307 redirect
//! - `GET /health`   - Database check
//!
//! # Edge tier
//!
//! - `GET /r/{slug}` - Forward to the resolution tier, relay its answer
//! - `GET /health`   - Process liveness
//!
//! Both routers trim trailing slashes and carry the request tracing layer.

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::edge::{edge_health_handler, edge_redirect_handler};
use crate::state::{AppState, EdgeState};

/// Constructs the resolution tier router.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/r/{slug}", get(redirect_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Constructs the public edge router.
pub fn edge_router(state: EdgeState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/r/{slug}", get(edge_redirect_handler))
        .route("/health", get(edge_health_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
