//! Plain TCP dial strategy.

use crate::dialer::traits::{ConnectionMode, Dialer};
use crate::error::{PingError, Result};
use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Measures the TCP handshake only.
pub struct TcpDialer {
    target: SocketAddr,
    timeout: Duration,
}

impl TcpDialer {
    /// Create a new TCP dialer.
    ///
    /// # Arguments
    /// * `target` - Address to connect to
    /// * `timeout` - Limit for each connection attempt
    pub fn new(target: SocketAddr, timeout: Duration) -> Self {
        Self { target, timeout }
    }
}

/// Connect to `target`, mapping refusals and timeouts to [`PingError::Connect`].
pub(crate) async fn connect(target: SocketAddr, limit: Duration) -> Result<TcpStream> {
    match timeout(limit, TcpStream::connect(target)).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(source)) => Err(PingError::Connect { target, source }),
        Err(_) => Err(PingError::Connect {
            target,
            source: io::Error::new(
                io::ErrorKind::TimedOut,
                format!("timed out after {:?}", limit),
            ),
        }),
    }
}

#[async_trait]
impl Dialer for TcpDialer {
    async fn connect_and_close(&self) -> Result<()> {
        let stream = connect(self.target, self.timeout).await?;
        drop(stream);
        Ok(())
    }

    fn mode(&self) -> ConnectionMode {
        ConnectionMode::Tcp
    }

    fn target(&self) -> SocketAddr {
        self.target
    }
}
