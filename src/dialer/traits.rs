//! Dial strategy abstraction.
//!
//! A [`Dialer`] performs one complete connect-and-close against a fixed
//! target. The TCP and TLS implementations are interchangeable, which is
//! what lets the sampler time either without knowing which one it runs.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Default timeout of each timed connection attempt.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Which kind of connection is being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionMode {
    /// TCP handshake only.
    Tcp,
    /// TCP handshake followed by a TLS handshake.
    #[default]
    Tls,
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "TCP"),
            Self::Tls => write!(f, "TLS"),
        }
    }
}

/// Trait for connection strategies.
///
/// Implementations must be safe to invoke concurrently and repeatedly:
/// every call opens and closes its own connection and only reads shared
/// configuration.
///
/// # Example
///
/// ```ignore
/// use tlsping::dialer::Dialer;
///
/// async fn attempt<D: Dialer + ?Sized>(dialer: &D) -> tlsping::error::Result<()> {
///     dialer.connect_and_close().await
/// }
/// ```
#[async_trait]
pub trait Dialer: Send + Sync {
    /// Open a connection to the target and close it right away.
    async fn connect_and_close(&self) -> Result<()>;

    /// The kind of connection this dialer establishes.
    fn mode(&self) -> ConnectionMode;

    /// The address being dialed.
    fn target(&self) -> SocketAddr;
}

/// A shared dialer for dynamic dispatch across worker tasks.
pub type SharedDialer = std::sync::Arc<dyn Dialer>;
