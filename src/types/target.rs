//! The concrete target every attempt of a run connects to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// A host name that has been resolved to a single IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedTarget {
    /// Host name as given (or defaulted); used as the TLS server name.
    pub host: String,
    /// The address every attempt connects to.
    pub ip: IpAddr,
    pub port: u16,
}

impl ResolvedTarget {
    /// Create a new resolved target.
    pub fn new(host: impl Into<String>, ip: IpAddr, port: u16) -> Self {
        Self {
            host: host.into(),
            ip,
            port,
        }
    }

    /// Socket address to dial.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host == self.ip.to_string() {
            write!(f, "{}", self.socket_addr())
        } else {
            write!(f, "{} ({})", self.host, self.socket_addr())
        }
    }
}
