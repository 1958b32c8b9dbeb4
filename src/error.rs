//! Error types for tlsping.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for a measurement run.
///
/// Every variant carries enough context (address, target, cause) to be
/// rendered as a human-readable message by the caller.
#[derive(Error, Debug)]
pub enum PingError {
    #[error("invalid address '{address}': {reason}")]
    AddressFormat { address: String, reason: String },

    #[error("failed to resolve '{host}': {reason}")]
    Resolution { host: String, reason: String },

    #[error("connection to {target} failed: {source}")]
    Connect {
        target: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("TLS handshake with {target} failed: {source}")]
    TlsHandshake {
        target: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("measurement worker failed: {0}")]
    Worker(String),
}

impl PingError {
    pub(crate) fn address_format(address: &str, reason: impl Into<String>) -> Self {
        Self::AddressFormat {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn resolution(host: &str, reason: impl ToString) -> Self {
        Self::Resolution {
            host: host.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AddressFormat { .. } => ErrorKind::AddressFormat,
            Self::Resolution { .. } => ErrorKind::Resolution,
            Self::Connect { .. } => ErrorKind::Connect,
            Self::TlsHandshake { .. } => ErrorKind::TlsHandshake,
            Self::Worker(_) => ErrorKind::Worker,
        }
    }
}

/// Coarse classification of a [`PingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AddressFormat,
    Resolution,
    Connect,
    TlsHandshake,
    Worker,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressFormat => write!(f, "address format"),
            Self::Resolution => write!(f, "resolution"),
            Self::Connect => write!(f, "connect"),
            Self::TlsHandshake => write!(f, "TLS handshake"),
            Self::Worker => write!(f, "worker"),
        }
    }
}

/// Result type alias for measurement operations.
pub type Result<T> = std::result::Result<T, PingError>;

/// Errors raised while loading settings or trust roots.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("no certificates found in {0}")]
    NoCertificates(PathBuf),

    #[error("invalid certificate in {path}: {reason}")]
    InvalidCertificate { path: PathBuf, reason: String },

    #[error("could not determine the configuration directory")]
    DirectoryNotFound,
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidFormat(e.to_string())
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
