//! `host:port` address parsing.
//!
//! Accepts the forms:
//! - `example.com:443`
//! - `192.0.2.1:443`
//! - `[2001:db8::1]:443` (IPv6 literals must be bracketed)
//! - `:443` (empty host, defaults to `localhost`)

use crate::error::PingError;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Host used when the address carries an empty host component.
pub const DEFAULT_HOST: &str = "localhost";

/// A validated `host:port` pair, before any name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort {
    host: String,
    port: u16,
}

impl HostPort {
    /// Split and validate an address string.
    pub fn parse(address: &str) -> Result<Self, PingError> {
        let (host, port) = split_host_port(address)?;

        let port = parse_port(port).map_err(|reason| PingError::address_format(address, reason))?;

        let host = if host.is_empty() {
            DEFAULT_HOST.to_string()
        } else if host.parse::<IpAddr>().is_ok() || is_valid_hostname(host) {
            host.to_string()
        } else {
            return Err(PingError::address_format(
                address,
                format!("invalid host name '{}'", host),
            ));
        };

        Ok(Self { host, port })
    }

    /// The host name, or `localhost` when the address omitted it.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The host as an IP address, if it is a literal.
    pub fn ip_literal(&self) -> Option<IpAddr> {
        self.host.parse().ok()
    }
}

impl FromStr for HostPort {
    type Err = PingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Split `address` into its raw host and port parts.
fn split_host_port(address: &str) -> Result<(&str, &str), PingError> {
    let err = |reason: &str| PingError::address_format(address, reason);

    let (host, port) = if let Some(rest) = address.strip_prefix('[') {
        let end = rest
            .find(']')
            .ok_or_else(|| err("missing ']' in address"))?;
        let host = &rest[..end];
        let port = rest[end + 1..]
            .strip_prefix(':')
            .ok_or_else(|| err("missing port in address"))?;
        (host, port)
    } else {
        let colon = address
            .rfind(':')
            .ok_or_else(|| err("missing port in address"))?;
        let host = &address[..colon];
        if host.contains(':') {
            return Err(err("too many colons in address"));
        }
        (host, &address[colon + 1..])
    };

    if host.contains(['[', ']']) || port.contains(['[', ']']) {
        return Err(err("unexpected bracket in address"));
    }

    Ok((host, port))
}

fn parse_port(port: &str) -> Result<u16, String> {
    if port.is_empty() {
        return Err("missing port in address".to_string());
    }
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(format!("invalid port '{}'", port)),
        Ok(p) => Ok(p),
    }
}

/// Check if a string is a valid DNS host name.
fn is_valid_hostname(s: &str) -> bool {
    let s = s.strip_suffix('.').unwrap_or(s);
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    s.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_hostname() {
        let hp = HostPort::parse("example.com:443").unwrap();
        assert_eq!(hp.host(), "example.com");
        assert_eq!(hp.port(), 443);
        assert!(hp.ip_literal().is_none());
    }

    #[test]
    fn test_parse_ipv4() {
        let hp = HostPort::parse("192.0.2.1:8443").unwrap();
        assert_eq!(hp.ip_literal(), Some("192.0.2.1".parse().unwrap()));
        assert_eq!(hp.port(), 8443);
    }

    #[test]
    fn test_parse_ipv6() {
        let hp = HostPort::parse("[::1]:443").unwrap();
        assert_eq!(hp.host(), "::1");
        assert_eq!(hp.to_string(), "[::1]:443");
    }

    #[test]
    fn test_empty_host_defaults_to_localhost() {
        let hp = HostPort::parse(":8080").unwrap();
        assert_eq!(hp.host(), "localhost");
        assert_eq!(hp.port(), 8080);
    }

    #[test]
    fn test_missing_port() {
        let err = HostPort::parse("example.com").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AddressFormat);

        let err = HostPort::parse("example.com:").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AddressFormat);
    }

    #[test]
    fn test_invalid_port() {
        assert!(HostPort::parse("example.com:https").is_err());
        assert!(HostPort::parse("example.com:0").is_err());
        assert!(HostPort::parse("example.com:70000").is_err());
    }

    #[test]
    fn test_unbracketed_ipv6() {
        let err = HostPort::parse("::1:443").unwrap_err();
        assert!(err.to_string().contains("too many colons"));
    }

    #[test]
    fn test_bad_brackets() {
        assert!(HostPort::parse("[::1:443").is_err());
        assert!(HostPort::parse("[::1]443").is_err());
        assert!(HostPort::parse("a]b:443").is_err());
    }

    #[test]
    fn test_invalid_hostname() {
        assert!(HostPort::parse("exa mple.com:443").is_err());
        assert!(HostPort::parse("-bad.example.com:443").is_err());
        assert!(HostPort::parse("a..b:443").is_err());
    }

    #[test]
    fn test_valid_hostname() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("sub.example.com."));
        assert!(is_valid_hostname("my-server"));
        assert!(is_valid_hostname("_srv.example.com"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("-invalid.com"));
    }
}
