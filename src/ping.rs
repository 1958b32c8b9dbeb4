//! Measurement runs: resolve once, dial N times concurrently, summarize.

use crate::dialer::{create_dialer, ConnectionMode, SharedDialer, CONNECT_TIMEOUT};
use crate::error::{PingError, Result};
use crate::resolver::{self, PROBE_TIMEOUT};
use crate::sampler;
use crate::stats::Summary;
use crate::types::ResolvedTarget;
use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_rustls::rustls::RootCertStore;
use tracing::debug;

/// Configuration of one measurement run.
#[derive(Debug, Clone)]
pub struct PingConfig {
    /// Number of connections to establish. Zero is treated as one.
    pub count: usize,
    /// Only measure the TCP handshake.
    pub tcp_only: bool,
    /// Accept any server certificate.
    pub insecure_skip_verify: bool,
    /// Trust roots for certificate verification; bundled roots when `None`.
    pub root_certs: Option<Arc<RootCertStore>>,
    /// Connect to this address instead of resolving the host name.
    pub ip: Option<IpAddr>,
    /// Limit for each timed connection attempt.
    pub connect_timeout: Duration,
    /// Limit for each reachability probe during resolution.
    pub probe_timeout: Duration,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            count: 1,
            tcp_only: false,
            insecure_skip_verify: false,
            root_certs: None,
            ip: None,
            connect_timeout: CONNECT_TIMEOUT,
            probe_timeout: PROBE_TIMEOUT,
        }
    }
}

impl PingConfig {
    /// Create a configuration for a single TLS connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of connections.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Skip the TLS handshake.
    pub fn with_tcp_only(mut self) -> Self {
        self.tcp_only = true;
        self
    }

    /// Disable certificate verification.
    pub fn with_insecure_skip_verify(mut self) -> Self {
        self.insecure_skip_verify = true;
        self
    }

    /// Verify server certificates against `roots`.
    pub fn with_root_certs(mut self, roots: RootCertStore) -> Self {
        self.root_certs = Some(Arc::new(roots));
        self
    }

    /// Use `ip` instead of resolving the host name.
    pub fn with_ip(mut self, ip: IpAddr) -> Self {
        self.ip = Some(ip);
        self
    }

    /// Set the per-attempt connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the reachability probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// The connection mode this configuration measures.
    pub fn mode(&self) -> ConnectionMode {
        if self.tcp_only {
            ConnectionMode::Tcp
        } else {
            ConnectionMode::Tls
        }
    }

    fn effective_count(&self) -> usize {
        self.count.max(1)
    }
}

/// Summary of a successful measurement run. Durations are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PingResult {
    /// Host name the address referred to.
    pub host: String,
    /// Address every connection was made to.
    pub ip: IpAddr,
    /// The address as given by the caller.
    pub address: String,
    pub mode: ConnectionMode,
    /// Number of connections measured.
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub std_dev: f64,
}

/// Establish `config.count` connections to `address` and summarize the
/// time spent establishing them.
///
/// `address` has the form `host:port`; an empty host means `localhost`.
/// The host is resolved once and the same IP address is used for every
/// connection; resolution time is not included in the results. Fails if
/// any single connection fails.
pub async fn ping(address: &str, config: &PingConfig) -> Result<PingResult> {
    let target = resolver::resolve(address, config.ip, config.probe_timeout).await?;
    debug!(%target, count = config.effective_count(), mode = %config.mode(), "starting measurement");

    let dialer = create_dialer(config, &target)?;
    measure(address, &target, dialer, config.effective_count()).await
}

/// Time `count` concurrent connections made by `dialer` to `target`.
pub async fn measure(
    address: &str,
    target: &ResolvedTarget,
    dialer: SharedDialer,
    count: usize,
) -> Result<PingResult> {
    let mode = dialer.mode();
    let durations = sampler::sample(dialer, count).await?;

    let summary = Summary::from_samples(&durations)
        .ok_or_else(|| PingError::Worker("no samples collected".to_string()))?;

    Ok(PingResult {
        host: target.host.clone(),
        ip: target.ip,
        address: address.to_string(),
        mode,
        count: durations.len(),
        min: summary.min,
        max: summary.max,
        avg: summary.avg,
        std_dev: summary.std_dev,
    })
}
