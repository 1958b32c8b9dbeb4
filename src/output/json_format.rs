//! JSON output formatting.

use crate::dialer::ConnectionMode;
use crate::ping::PingResult;
use crate::types::HostPort;
use serde::Serialize;
use std::io::{self, Write};

/// Structured record of a run, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonReport {
    pub host: String,
    pub ip: String,
    pub address: String,
    pub connection: ConnectionMode,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub stddev: f64,
    /// Empty on success.
    pub error: String,
}

impl JsonReport {
    /// Build the record of a successful run.
    pub fn from_result(result: &PingResult) -> Self {
        Self {
            host: result.host.clone(),
            ip: result.ip.to_string(),
            address: result.address.clone(),
            connection: result.mode,
            count: result.count,
            min: result.min,
            max: result.max,
            average: result.avg,
            stddev: result.std_dev,
            error: String::new(),
        }
    }

    /// Build the record of a failed run; statistics are left at zero.
    ///
    /// The host is taken from `address` when it parses, so a run that
    /// failed after the address was understood still names its host.
    pub fn from_error(
        address: &str,
        connection: ConnectionMode,
        count: usize,
        error: &dyn std::error::Error,
    ) -> Self {
        let host = address
            .parse::<HostPort>()
            .map(|hp| hp.host().to_string())
            .unwrap_or_default();

        Self {
            host,
            ip: String::new(),
            address: address.to_string(),
            connection,
            count,
            min: 0.0,
            max: 0.0,
            average: 0.0,
            stddev: 0.0,
            error: error.to_string(),
        }
    }
}

/// Print a record as a single line of JSON.
pub fn print_json(report: &JsonReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, report)
}

/// Write a record as a single line of JSON.
pub fn write_json<W: Write>(w: &mut W, report: &JsonReport) -> io::Result<()> {
    let json = serde_json::to_string(report).map_err(io::Error::other)?;
    writeln!(w, "{}", json)
}
