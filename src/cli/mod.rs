//! Command-line interface definitions for tlsping.
//!
//! Uses `clap` derive macros for declarative argument parsing.

mod run;

pub use run::{build_config, run};

use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

/// Upper bound on the number of concurrent connections per run.
pub const MAX_COUNT: i64 = 100;

/// Measure the time needed to establish TCP or TLS connections.
///
/// Connects repeatedly and concurrently to ADDRESS and reports the
/// minimum, average, maximum and standard deviation of the time spent
/// establishing each connection. The host name is resolved only once and
/// resolution time is not included.
#[derive(Parser, Debug)]
#[command(name = "tlsping")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Measure TCP and TLS connection establishment time", long_about)]
pub struct Cli {
    /// Server address as host:port (e.g. "example.com:443", "[::1]:8443", ":443")
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Number of connections to establish [default: 10, max: 100]
    #[arg(short = 'c', long, value_name = "N", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Only measure the TCP handshake, do not perform a TLS handshake
    #[arg(long, visible_alias = "tcp-only")]
    pub tcponly: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not verify the server certificate
    #[arg(long)]
    pub insecure: bool,

    /// PEM file with the certificate authorities to verify the server with
    #[arg(long, value_name = "PATH", env = "TLSPING_CA")]
    pub ca: Option<PathBuf>,

    /// Connect to this IP address instead of resolving the host name
    #[arg(long, value_name = "IP")]
    pub ip: Option<IpAddr>,

    /// Path to a settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
