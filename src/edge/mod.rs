//! Public edge tier.
//!
//! Forwards `GET /r/{slug}` to the resolution tier and relays its response
//! without following redirects server-side.
//!
//! # Modules
//!
//! - [`transport`] - Explicit HTTP client configuration
//! - [`forwarder`] - Upstream request construction and response classification
//! - [`handler`] - Axum handlers for the edge router

pub mod forwarder;
pub mod handler;
pub mod transport;

pub use forwarder::{ForwardOutcome, Forwarder, ForwardingError};
pub use handler::{edge_health_handler, edge_redirect_handler};
pub use transport::TransportConfig;
