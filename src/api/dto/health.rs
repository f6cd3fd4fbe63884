//! DTOs for health check endpoints.

use serde::Serialize;

pub const STATUS_OK: &str = "ok";
pub const STATUS_ERROR: &str = "error";

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

impl HealthResponse {
    pub fn healthy(checks: Option<HealthChecks>) -> Self {
        Self::with_status("healthy", checks)
    }

    pub fn degraded(checks: Option<HealthChecks>) -> Self {
        Self::with_status("degraded", checks)
    }

    fn with_status(status: &str, checks: Option<HealthChecks>) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks,
        }
    }
}

/// Health status for each system component.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}
