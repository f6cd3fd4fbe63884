//! Upstream forwarding to the resolution tier.

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use std::net::IpAddr;
use url::Url;

use crate::edge::TransportConfig;
use crate::utils::client_ip::X_FORWARDED_FOR;
use crate::utils::utm::is_dot_segment;

/// Headers that describe the inbound connection rather than the request.
const HOP_BY_HOP_HEADERS: [&str; 9] = [
    "host",
    "connection",
    "keep-alive",
    "proxy-connection",
    "transfer-encoding",
    "upgrade",
    "te",
    "trailer",
    "content-length",
];

/// Upstream statuses relayed to the client as redirects.
const RELAYED_REDIRECTS: [StatusCode; 5] = [
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::FOUND,
    StatusCode::SEE_OTHER,
    StatusCode::TEMPORARY_REDIRECT,
    StatusCode::PERMANENT_REDIRECT,
];

#[derive(Debug, thiserror::Error)]
pub enum ForwardingError {
    #[error("failed to create upstream request: {0}")]
    RequestConstruction(String),

    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream redirect carried no Location header")]
    MissingLocation,

    /// `.` and `..` cannot be sent as a path segment and are never valid slugs.
    #[error("slug is not routable: {0:?}")]
    UnroutableSlug(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ForwardingError {
    /// Message returned to the client in the `error` field.
    pub fn public_message(&self) -> &'static str {
        match self {
            ForwardingError::RequestConstruction(_) | ForwardingError::ClientBuild(_) => {
                "Failed to create request"
            }
            ForwardingError::Transport(_) => "Failed to forward request",
            ForwardingError::MissingLocation => "No redirect URL found",
            ForwardingError::UnroutableSlug(_) => "URL not found",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ForwardingError::UnroutableSlug(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// What the resolution tier answered.
#[derive(Debug)]
pub enum ForwardOutcome {
    /// Re-emit `status` with this exact `Location`.
    Redirect {
        status: StatusCode,
        location: HeaderValue,
    },
    /// Anything else, relayed as-is.
    Passthrough {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },
}

/// Sends slug lookups to the resolution tier.
pub struct Forwarder {
    client: reqwest::Client,
    base_url: Url,
}

impl Forwarder {
    /// Creates a forwarder for the resolution tier at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ForwardingError::ClientBuild`] if the client cannot be built.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, ForwardingError> {
        Ok(Self {
            client: transport.build_client()?,
            base_url,
        })
    }

    /// Builds `{base}/r/{slug}` with the slug encoded as a single path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ForwardingError::UnroutableSlug`] for `.` and `..`, which
    /// would otherwise be dropped from the path.
    pub fn resolution_url(&self, slug: &str) -> Result<Url, ForwardingError> {
        if is_dot_segment(slug) {
            return Err(ForwardingError::UnroutableSlug(slug.to_string()));
        }

        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| {
                ForwardingError::RequestConstruction(format!(
                    "base URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("r")
            .push(slug);

        Ok(url)
    }

    /// Forwards a lookup for `slug`, cloning `inbound` headers.
    ///
    /// `client_ip` is appended to `X-Forwarded-For` so the resolution tier
    /// can attribute the click when it runs behind this proxy.
    ///
    /// # Errors
    ///
    /// - [`ForwardingError::RequestConstruction`] if the request cannot be built
    /// - [`ForwardingError::Transport`] if the upstream is unreachable or the
    ///   body cannot be read
    /// - [`ForwardingError::MissingLocation`] for a redirect without `Location`
    pub async fn forward(
        &self,
        slug: &str,
        inbound: &HeaderMap,
        client_ip: Option<IpAddr>,
    ) -> Result<ForwardOutcome, ForwardingError> {
        let url = self.resolution_url(slug)?;
        let headers = forwarded_headers(inbound, client_ip);

        let request = self
            .client
            .get(url)
            .headers(headers)
            .build()
            .map_err(|e| ForwardingError::RequestConstruction(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(ForwardingError::Transport)?;

        let status = response.status();

        if RELAYED_REDIRECTS.contains(&status) {
            let location = response
                .headers()
                .get(header::LOCATION)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or(ForwardingError::MissingLocation)?;

            return Ok(ForwardOutcome::Redirect { status, location });
        }

        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(ForwardingError::Transport)?;

        Ok(ForwardOutcome::Passthrough {
            status,
            content_type,
            body,
        })
    }
}

/// Clones `inbound` minus hop-by-hop headers and extends `X-Forwarded-For`.
///
/// Headers listed in the inbound `Connection` header are hop-by-hop too and
/// are dropped along with the fixed set.
pub fn forwarded_headers(inbound: &HeaderMap, client_ip: Option<IpAddr>) -> HeaderMap {
    let connection_named = connection_tokens(inbound);
    let mut headers = HeaderMap::with_capacity(inbound.len() + 1);

    for (name, value) in inbound {
        let name_str = name.as_str();
        if !HOP_BY_HOP_HEADERS.contains(&name_str)
            && !connection_named.iter().any(|token| token == name_str)
        {
            headers.append(name.clone(), value.clone());
        }
    }

    if let Some(ip) = client_ip {
        let chain = match headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
        {
            Some(existing) => format!("{existing}, {ip}"),
            None => ip.to_string(),
        };

        if let Ok(value) = HeaderValue::from_str(&chain) {
            headers.insert(X_FORWARDED_FOR, value);
        }
    }

    headers
}

/// Lowercased header names listed across all `Connection` values.
fn connection_tokens(inbound: &HeaderMap) -> Vec<String> {
    inbound
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}
