//! HTTP middleware shared by both tiers.

pub mod tracing;
