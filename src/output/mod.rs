//! Output formatting module.
//!
//! Provides formatters for plain text and JSON output of results.

mod json_format;
mod plain;

pub use json_format::{print_json, write_json, JsonReport};
pub use plain::{format_duration, print_error, print_plain, print_warning, write_plain};

use crate::ping::PingResult;
use std::io;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
}

/// Format and print a result according to the specified format.
pub fn print_result(result: &PingResult, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => print_plain(result),
        OutputFormat::Json => print_json(&JsonReport::from_result(result)),
    }
}
