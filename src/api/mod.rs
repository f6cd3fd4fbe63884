//! HTTP layer of the resolution tier.
//!
//! Translates requests into [`crate::application`] calls and formats the
//! responses.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
