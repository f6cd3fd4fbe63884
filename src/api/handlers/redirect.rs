//! Handler for slug redirects.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::IntoResponse,
};
use std::net::SocketAddr;

use crate::application::services::ClickContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Resolves a slug and redirects to its UTM-decorated destination.
///
/// # Endpoint
///
/// `GET /r/{slug}`
///
/// # Request Flow
///
/// 1. Determine the client IP (peer address, or forwarded headers when
///    running behind the edge proxy)
/// 2. Resolve the slug, recording the click
/// 3. Return 307 Temporary Redirect with `Location`
///
/// # Errors
///
/// - **404**: unknown, empty or expired slug (`{"error": "URL not found"}`)
/// - **500**: mapping lookup failed, or the destination is not a valid
///   `Location` value (no click is recorded)
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let context = ClickContext {
        client_ip: client_ip(&headers, addr, state.behind_proxy).to_string(),
        referrer: header_string(&headers, header::REFERER),
        user_agent: header_string(&headers, header::USER_AGENT),
    };

    let instruction = state.resolution_service.resolve(&slug, &context).await?;

    Ok((instruction.status, [(header::LOCATION, instruction.location)]))
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
