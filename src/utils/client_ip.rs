//! Client IP extraction from HTTP request metadata.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";

/// Determines the originating client IP address.
///
/// When `behind_proxy` is `false`, the socket peer address is always used, so
/// clients cannot spoof their address through headers.
///
/// When `behind_proxy` is `true`, the first parseable entry of
/// `X-Forwarded-For` wins, then `X-Real-IP`, then the peer address. Enable only
/// when the service is reachable exclusively through a trusted proxy such as
/// the edge tier.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let peer: SocketAddr = "10.0.0.1:5555".parse().unwrap();
/// assert_eq!(client_ip(&headers, peer, true).to_string(), "203.0.113.7");
/// assert_eq!(client_ip(&headers, peer, false).to_string(), "10.0.0.1");
/// ```
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> IpAddr {
    if behind_proxy && let Some(ip) = forwarded_ip(headers) {
        return ip;
    }

    peer.ip()
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let from_forwarded_for = headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .find_map(|entry| entry.trim().parse::<IpAddr>().ok());

    from_forwarded_for.or_else(|| {
        headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    })
}
