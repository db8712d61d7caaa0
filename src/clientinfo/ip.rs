//! Client IP resolution module
//!
//! Resolves the client address from the TCP peer and, when the deployment
//! trusts its reverse proxies, from forwarding headers.

use hyper::header::HeaderMap;
use std::net::IpAddr;
use thiserror::Error;

/// Error returned when a trusted-subnet entry is not valid CIDR notation.
#[derive(Debug, Error)]
#[error("invalid CIDR notation: {0}")]
pub struct SubnetParseError(pub String);

/// An IPv4 or IPv6 subnet in CIDR notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    addr: IpAddr,
    prefix_len: u8,
}

impl Subnet {
    /// Parse CIDR notation, e.g. "10.0.0.0/8" or "fd00::/8".
    pub fn parse(value: &str) -> Result<Self, SubnetParseError> {
        let value = value.trim();
        let (addr_part, len_part) = value
            .split_once('/')
            .ok_or_else(|| SubnetParseError(value.to_string()))?;

        let addr: IpAddr = addr_part
            .parse()
            .map_err(|_| SubnetParseError(value.to_string()))?;
        let prefix_len: u8 = len_part
            .parse()
            .map_err(|_| SubnetParseError(value.to_string()))?;

        let max_len = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        if prefix_len > max_len {
            return Err(SubnetParseError(value.to_string()));
        }

        Ok(Self { addr, prefix_len })
    }

    /// Check whether an address falls inside this subnet.
    ///
    /// Addresses of a different family never match.
    pub fn contains(&self, ip: IpAddr) -> bool {
        match (self.addr, ip) {
            (IpAddr::V4(net), IpAddr::V4(ip)) => {
                prefix_matches(&net.octets(), &ip.octets(), self.prefix_len)
            }
            (IpAddr::V6(net), IpAddr::V6(ip)) => {
                prefix_matches(&net.octets(), &ip.octets(), self.prefix_len)
            }
            _ => false,
        }
    }
}

/// Compare the leading `prefix_len` bits of two addresses.
fn prefix_matches(net: &[u8], ip: &[u8], prefix_len: u8) -> bool {
    let full_bytes = usize::from(prefix_len / 8);
    let remainder_bits = prefix_len % 8;

    if net[..full_bytes] != ip[..full_bytes] {
        return false;
    }

    if remainder_bits == 0 {
        return true;
    }

    let mask = 0xffu8 << (8 - remainder_bits);
    (net[full_bytes] & mask) == (ip[full_bytes] & mask)
}

/// Resolve the client IP for a request.
///
/// The TCP peer address is the baseline. When `trust_forwarded` is set and
/// the peer is inside a trusted subnet (an empty subnet list trusts every
/// peer), the first valid address in `X-Forwarded-For` wins, then
/// `X-Real-IP`. Malformed or absent header values fall back to the peer.
pub fn resolve_client_ip(
    headers: &HeaderMap,
    remote: IpAddr,
    trust_forwarded: bool,
    trusted_subnets: &[Subnet],
) -> IpAddr {
    if trust_forwarded && peer_is_trusted(remote, trusted_subnets) {
        if let Some(ip) = first_forwarded_ip(headers) {
            return ip;
        }

        if let Some(ip) = header_ip(headers, "x-real-ip") {
            return ip;
        }
    }

    remote
}

/// An empty trusted-subnet list means every peer is trusted.
fn peer_is_trusted(remote: IpAddr, trusted_subnets: &[Subnet]) -> bool {
    trusted_subnets.is_empty() || trusted_subnets.iter().any(|s| s.contains(remote))
}

/// First parseable address in the X-Forwarded-For chain.
fn first_forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let header = headers.get("x-forwarded-for")?.to_str().ok()?;

    header
        .split(',')
        .find_map(|part| part.trim().parse::<IpAddr>().ok())
}

/// Parse a single-value IP header.
fn header_ip(headers: &HeaderMap, name: &str) -> Option<IpAddr> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .trim()
        .parse::<IpAddr>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn remote() -> IpAddr {
        "192.0.2.1".parse().unwrap()
    }

    fn headers(entries: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in entries {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_subnet_parse() {
        assert!(Subnet::parse("10.0.0.0/8").is_ok());
        assert!(Subnet::parse(" fd00::/8 ").is_ok());
        assert!(Subnet::parse("10.0.0.0").is_err());
        assert!(Subnet::parse("10.0.0.0/33").is_err());
        assert!(Subnet::parse("fd00::/129").is_err());
        assert!(Subnet::parse("not-an-ip/8").is_err());
    }

    #[test]
    fn test_subnet_contains() {
        let subnet = Subnet::parse("10.0.0.0/8").unwrap();
        assert!(subnet.contains("10.1.2.3".parse().unwrap()));
        assert!(!subnet.contains("11.0.0.1".parse().unwrap()));
        assert!(!subnet.contains("fd00::1".parse().unwrap()));

        let narrow = Subnet::parse("192.0.2.128/25").unwrap();
        assert!(narrow.contains("192.0.2.200".parse().unwrap()));
        assert!(!narrow.contains("192.0.2.1".parse().unwrap()));

        let v6 = Subnet::parse("fd00::/8").unwrap();
        assert!(v6.contains("fd12::1".parse().unwrap()));
        assert!(!v6.contains("fe80::1".parse().unwrap()));
    }

    #[test]
    fn test_peer_without_forwarding() {
        let ip = resolve_client_ip(&HeaderMap::new(), remote(), true, &[]);
        assert_eq!(ip, remote());
    }

    #[test]
    fn test_forwarded_for_wins_when_trusted() {
        let headers = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1")]);
        let ip = resolve_client_ip(&headers, remote(), true, &[]);
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_forwarded_for_skips_garbage_entries() {
        let headers = headers(&[("x-forwarded-for", "unknown, 203.0.113.7")]);
        let ip = resolve_client_ip(&headers, remote(), true, &[]);
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_real_ip_fallback() {
        let headers = headers(&[
            ("x-forwarded-for", "not-an-ip"),
            ("x-real-ip", "198.51.100.9"),
        ]);
        let ip = resolve_client_ip(&headers, remote(), true, &[]);
        assert_eq!(ip, "198.51.100.9".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_headers_ignored_when_not_trusting() {
        let headers = headers(&[("x-forwarded-for", "203.0.113.7")]);
        let ip = resolve_client_ip(&headers, remote(), false, &[]);
        assert_eq!(ip, remote());
    }

    #[test]
    fn test_headers_ignored_for_untrusted_peer() {
        let headers = headers(&[("x-forwarded-for", "203.0.113.7")]);
        let trusted = vec![Subnet::parse("10.0.0.0/8").unwrap()];
        let ip = resolve_client_ip(&headers, remote(), true, &trusted);
        assert_eq!(ip, remote());
    }

    #[test]
    fn test_headers_used_for_trusted_peer() {
        let headers = headers(&[("x-forwarded-for", "203.0.113.7")]);
        let trusted = vec![Subnet::parse("192.0.2.0/24").unwrap()];
        let ip = resolve_client_ip(&headers, remote(), true, &trusted);
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }
}
