//! # tlsping - TCP and TLS connection latency
//!
//! tlsping measures how long it takes to establish connections to a
//! server, either the TCP handshake alone or the TCP handshake followed by
//! a TLS handshake, and summarizes the samples.
//!
//! ## Features
//!
//! - **Concurrent sampling**: all connections of a run are made in parallel
//! - **Fair timing**: name resolution and reachability probing happen once,
//!   before any timing starts
//! - **TLS control**: custom trust roots, or no certificate verification
//! - **Output**: plain text or JSON
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use tlsping::{ping, PingConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = PingConfig::new().with_count(10);
//!     let result = ping("example.com:443", &config).await.unwrap();
//!
//!     println!("avg {:.3}s over {} connections", result.avg, result.count);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Address parsing and resolved targets
//! - [`resolver`] - Name resolution with reachability probing
//! - [`dialer`] - The `Dialer` trait and its TCP and TLS implementations
//! - [`sampler`] - Timing and concurrent execution of attempts
//! - [`stats`] - Summary statistics
//! - [`ping`] - Measurement runs tying the above together
//! - [`config`] - Settings and trust-root loading
//! - [`output`] - Output formatting utilities
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod dialer;
pub mod error;
pub mod output;
pub mod ping;
pub mod resolver;
pub mod sampler;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use dialer::{ConnectionMode, Dialer};
pub use error::{ConfigError, ErrorKind, PingError};
pub use ping::{measure, ping, PingConfig, PingResult};
pub use stats::Summary;
pub use types::{HostPort, ResolvedTarget};
