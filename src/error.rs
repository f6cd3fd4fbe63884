//! Crate-wide error type and its HTTP rendering.
//!
//! Every error leaving a handler is rendered as `{"error": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::edge::ForwardingError;
use crate::utils::utm::ValidationError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed mapping fields; only reachable from the admin write path.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    /// Store unavailable or a statement failed.
    #[error("Database error: {0}")]
    Persistence(#[source] sqlx::Error),

    #[error(transparent)]
    Forwarding(#[from] ForwardingError),

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Forwarding(e) => e.status_code(),
            AppError::Persistence(_) | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to a client. Database details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Persistence(_) => "Database error".to_string(),
            AppError::Forwarding(e) => e.public_message().to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(format!(
                "Unique constraint violation: {}",
                db.constraint().unwrap_or("unknown")
            ));
        }

        AppError::Persistence(e)
    }
}
