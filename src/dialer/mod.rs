//! Dial strategies: the operation whose duration is measured.
//!
//! The strategy is picked once per run from the configuration and then
//! shared by every worker.

pub mod tcp;
pub mod tls;
pub mod traits;

pub use tcp::TcpDialer;
pub use tls::TlsDialer;
pub use traits::{ConnectionMode, Dialer, SharedDialer, CONNECT_TIMEOUT};

use crate::error::Result;
use crate::ping::PingConfig;
use crate::types::ResolvedTarget;
use std::sync::Arc;
use tracing::debug;

/// Create the dialer matching `config` for `target`.
pub fn create_dialer(config: &PingConfig, target: &ResolvedTarget) -> Result<SharedDialer> {
    let dialer: SharedDialer = if config.tcp_only {
        Arc::new(TcpDialer::new(target.socket_addr(), config.connect_timeout))
    } else {
        Arc::new(TlsDialer::new(
            target,
            config.connect_timeout,
            config.insecure_skip_verify,
            config.root_certs.clone(),
        )?)
    };

    debug!(mode = %dialer.mode(), target = %dialer.target(), "dialer selected");
    Ok(dialer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_create_dialer_by_mode() {
        let target = ResolvedTarget::new("localhost", IpAddr::V4(Ipv4Addr::LOCALHOST), 443);

        let dialer = create_dialer(&PingConfig::new().with_tcp_only(), &target).unwrap();
        assert_eq!(dialer.mode(), ConnectionMode::Tcp);

        let dialer = create_dialer(&PingConfig::new(), &target).unwrap();
        assert_eq!(dialer.mode(), ConnectionMode::Tls);
    }
}
