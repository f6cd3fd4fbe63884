//! HTTP handlers served by the edge tier.

use axum::{
    Json,
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::api::dto::health::HealthResponse;
use crate::edge::ForwardOutcome;
use crate::error::AppError;
use crate::state::EdgeState;

/// Forwards a slug lookup and relays the resolution tier's answer.
///
/// # Endpoint
///
/// `GET /r/{slug}`
///
/// # Responses
///
/// - Upstream 301/302/303/307/308: same status, same `Location`
/// - Any other upstream response: same status, body and `Content-Type`
/// - **404**: slug is `.` or `..`
/// - **500**: request could not be built, upstream unreachable, or redirect
///   without `Location`
pub async fn edge_redirect_handler(
    Path(slug): Path<String>,
    State(state): State<EdgeState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let outcome = state
        .forwarder
        .forward(&slug, &headers, Some(addr.ip()))
        .await
        .map_err(|e| {
            if e.status_code().is_server_error() {
                metrics::counter!("edge_forward_failures_total").increment(1);
                tracing::warn!(slug = %slug, error = %e, "Failed to forward redirect lookup");
            }
            AppError::from(e)
        })?;

    let response = match outcome {
        ForwardOutcome::Redirect { status, location } => {
            tracing::debug!(slug = %slug, status = status.as_u16(), "Relaying redirect");
            (status, [(header::LOCATION, location)]).into_response()
        }
        ForwardOutcome::Passthrough {
            status,
            content_type,
            body,
        } => {
            let mut response = (status, body).into_response();
            match content_type {
                Some(value) => {
                    response.headers_mut().insert(header::CONTENT_TYPE, value);
                }
                None => {
                    response.headers_mut().remove(header::CONTENT_TYPE);
                }
            }
            response
        }
    };

    Ok(response)
}

/// Liveness of the edge process itself; the upstream is not probed.
///
/// # Endpoint
///
/// `GET /health`
pub async fn edge_health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(None))
}
