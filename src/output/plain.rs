//! Plain text output formatting.

use crate::ping::PingResult;
use console::style;
use std::io::{self, Write};

/// Print a result as two human-readable lines.
pub fn print_plain(result: &PingResult) -> io::Result<()> {
    let stdout = io::stdout();
    write_plain(&mut stdout.lock(), result)
}

/// Write a result as two human-readable lines:
///
/// ```text
/// TLS connection to example.com:443 (93.184.216.34) (10 connections)
/// min/avg/max/stddev = 10.113ms/11.267ms/12.928ms/0.891ms
/// ```
pub fn write_plain<W: Write>(out: &mut W, result: &PingResult) -> io::Result<()> {
    writeln!(
        out,
        "{} connection to {} ({}) ({} connections)",
        style(result.mode).bold(),
        style(&result.address).bold(),
        result.ip,
        result.count
    )?;
    writeln!(
        out,
        "min/avg/max/stddev = {}/{}/{}/{}",
        format_duration(result.min),
        format_duration(result.avg),
        format_duration(result.max),
        format_duration(result.std_dev)
    )
}

/// Format a duration given in seconds with a unit suited to its magnitude.
pub fn format_duration(secs: f64) -> String {
    if secs < 1e-3 {
        format!("{:.3}µs", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:.3}ms", secs * 1e3)
    } else {
        format!("{:.3}s", secs)
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialer::ConnectionMode;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0.000µs");
        assert_eq!(format_duration(0.000_250), "250.000µs");
        assert_eq!(format_duration(0.012_345), "12.345ms");
        assert_eq!(format_duration(2.5), "2.500s");
    }

    #[test]
    fn test_write_plain() {
        console::set_colors_enabled(false);
        let result = PingResult {
            host: "localhost".to_string(),
            ip: "127.0.0.1".parse().unwrap(),
            address: "localhost:443".to_string(),
            mode: ConnectionMode::Tls,
            count: 3,
            min: 0.001,
            max: 0.003,
            avg: 0.002,
            std_dev: 0.0005,
        };

        let mut buf = Vec::new();
        write_plain(&mut buf, &result).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "TLS connection to localhost:443 (127.0.0.1) (3 connections)\n\
             min/avg/max/stddev = 1.000ms/2.000ms/3.000ms/500.000µs\n"
        );
    }
}
