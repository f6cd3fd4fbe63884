//! One-way IP address anonymization for click analytics.
//!
//! IPv4 addresses are truncated to their /24 network and IPv6 addresses to
//! their /48 network. The full address is never returned or stored.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Prefix length kept for IPv4 addresses.
pub const IPV4_PREFIX_LEN: u32 = 24;

/// Prefix length kept for IPv6 addresses.
pub const IPV6_PREFIX_LEN: u32 = 48;

/// Masks an address down to its network prefix.
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are treated as IPv4.
pub fn mask_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V4(v4) => IpAddr::V4(mask_v4(v4)),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(mask_v4(v4)),
            None => IpAddr::V6(mask_v6(v6)),
        },
    }
}

fn mask_v4(ip: Ipv4Addr) -> Ipv4Addr {
    let mask = u32::MAX << (32 - IPV4_PREFIX_LEN);
    Ipv4Addr::from(u32::from_be_bytes(ip.octets()) & mask)
}

fn mask_v6(ip: Ipv6Addr) -> Ipv6Addr {
    let mask = u128::MAX << (128 - IPV6_PREFIX_LEN);
    Ipv6Addr::from(u128::from_be_bytes(ip.octets()) & mask)
}

/// Anonymizes a textual IP address.
///
/// Returns the network prefix as a string, or an empty string if `raw` is not
/// a valid IPv4 or IPv6 literal. Never fails.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(anonymize("203.0.113.77"), "203.0.113.0");
/// assert_eq!(anonymize("2001:db8:abcd:12::1"), "2001:db8:abcd::");
/// assert_eq!(anonymize("not-an-ip"), "");
/// ```
pub fn anonymize(raw: &str) -> String {
    match raw.trim().parse::<IpAddr>() {
        Ok(ip) => mask_ip(ip).to_string(),
        Err(_) => String::new(),
    }
}
