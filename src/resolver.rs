//! Address resolution with reachability probing.
//!
//! The name behind a `host:port` address is looked up once per run. When
//! the lookup yields several addresses, each one is probed with a short
//! TCP connect and the first that accepts a connection is used for every
//! timed attempt. Nothing done here is included in the reported timings.

use crate::error::{PingError, Result};
use crate::types::{HostPort, ResolvedTarget};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace};
use trust_dns_resolver::config::{LookupIpStrategy, ResolverConfig, ResolverOpts};
use trust_dns_resolver::system_conf::read_system_conf;
use trust_dns_resolver::TokioAsyncResolver;

/// Default timeout of each reachability probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Resolve `address` to the target used for all attempts of a run.
///
/// If `ip` is given, no lookup or probing is performed and the host name
/// from `address` is kept as is.
///
/// If no candidate accepts a connection within `probe_timeout`, the first
/// candidate is returned anyway; the timed attempts will then report the
/// actual connection error.
pub async fn resolve(
    address: &str,
    ip: Option<IpAddr>,
    probe_timeout: Duration,
) -> Result<ResolvedTarget> {
    let host_port = HostPort::parse(address)?;
    let host = host_port.host();
    let port = host_port.port();

    if let Some(ip) = ip {
        debug!(host, %ip, "using pre-selected address");
        return Ok(ResolvedTarget::new(host, ip, port));
    }

    let candidates = lookup(&host_port).await?;
    let ip = match probe(&candidates, port, probe_timeout).await {
        Some(ip) => ip,
        None => {
            debug!(host, "no candidate accepted a probe, using the first one");
            candidates[0]
        }
    };

    Ok(ResolvedTarget::new(host, ip, port))
}

/// Look up the candidate addresses of a host, in resolution order.
///
/// The returned vector is never empty.
pub async fn lookup(host_port: &HostPort) -> Result<Vec<IpAddr>> {
    if let Some(ip) = host_port.ip_literal() {
        return Ok(vec![ip]);
    }

    let host = host_port.host();
    let (config, mut opts) = read_system_conf().unwrap_or_else(|e| {
        debug!(error = %e, "system resolver configuration unavailable, using defaults");
        (ResolverConfig::default(), ResolverOpts::default())
    });
    // Both families are candidates, IPv4 first.
    opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    let resolver = TokioAsyncResolver::tokio(config, opts);

    let response = resolver
        .lookup_ip(host)
        .await
        .map_err(|e| PingError::resolution(host, e))?;

    let ips: Vec<IpAddr> = response.iter().collect();
    if ips.is_empty() {
        return Err(PingError::resolution(host, "no addresses found"));
    }

    debug!(host, candidates = ?ips, "resolved host");
    Ok(ips)
}

/// Return the first candidate accepting a TCP connection on `port`.
pub async fn probe(candidates: &[IpAddr], port: u16, probe_timeout: Duration) -> Option<IpAddr> {
    for &ip in candidates {
        let addr = SocketAddr::new(ip, port);
        match timeout(probe_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                trace!(%addr, "probe accepted");
                return Some(ip);
            }
            Ok(Err(e)) => trace!(%addr, error = %e, "probe failed"),
            Err(_) => trace!(%addr, "probe timed out"),
        }
    }
    None
}
