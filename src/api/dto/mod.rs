//! Data Transfer Objects for HTTP responses.
//!
//! Error bodies live with [`crate::error::AppError`].

pub mod health;
