//! Runs a measurement from parsed command-line arguments.

use crate::cli::{Cli, MAX_COUNT};
use crate::config::{load_ca_certs, AppSettings};
use crate::output::{self, JsonReport, OutputFormat};
use crate::ping::{ping, PingConfig};
use anyhow::{bail, Context};

/// Build the measurement configuration from arguments and settings.
///
/// A count of zero or less means one connection; a count above
/// [`MAX_COUNT`] is rejected.
pub fn build_config(cli: &Cli, settings: &AppSettings) -> anyhow::Result<PingConfig> {
    let count = cli.count.unwrap_or(settings.default_count as i64);
    if count > MAX_COUNT {
        bail!("number of allowed connections cannot exceed {}", MAX_COUNT);
    }

    let mut config = PingConfig::new()
        .with_count(count.max(1) as usize)
        .with_connect_timeout(settings.connect_timeout())
        .with_probe_timeout(settings.probe_timeout());

    if cli.tcponly {
        config = config.with_tcp_only();
    }
    if cli.insecure {
        config = config.with_insecure_skip_verify();
    }
    if let Some(path) = &cli.ca {
        let roots = load_ca_certs(path)
            .with_context(|| format!("error loading CA certificates from '{}'", path.display()))?;
        config = config.with_root_certs(roots);
    }
    if let Some(ip) = cli.ip {
        config = config.with_ip(ip);
    }

    Ok(config)
}

/// Execute the command: measure and print the result.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = AppSettings::load(cli.config.as_deref()).context("failed to load settings")?;
    let config = build_config(&cli, &settings)?;

    let format = if cli.json || settings.json {
        OutputFormat::Json
    } else {
        OutputFormat::Plain
    };

    if cli.tcponly && (cli.insecure || cli.ca.is_some()) {
        output::print_warning("TLS options have no effect in TCP-only mode");
    } else if cli.insecure && cli.ca.is_some() {
        output::print_warning("--ca has no effect together with --insecure");
    }

    match ping(&cli.address, &config).await {
        Ok(result) => output::print_result(&result, format).context("failed to write result"),
        Err(e) => {
            if format == OutputFormat::Json {
                let report = JsonReport::from_error(&cli.address, config.mode(), config.count, &e);
                output::print_json(&report).context("failed to write result")?;
            }
            Err(e).with_context(|| format!("error connecting to '{}'", cli.address))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialer::ConnectionMode;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tlsping").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_from_settings() {
        let config = build_config(&parse(&["localhost:443"]), &AppSettings::default()).unwrap();
        assert_eq!(config.count, 10);
        assert_eq!(config.mode(), ConnectionMode::Tls);
        assert!(!config.insecure_skip_verify);
        assert!(config.root_certs.is_none());
    }

    #[test]
    fn test_non_positive_count_means_one() {
        let settings = AppSettings::default();
        let config = build_config(&parse(&["-c", "0", "localhost:443"]), &settings).unwrap();
        assert_eq!(config.count, 1);

        let config = build_config(&parse(&["-c", "-4", "localhost:443"]), &settings).unwrap();
        assert_eq!(config.count, 1);
    }

    #[test]
    fn test_count_ceiling() {
        let settings = AppSettings::default();
        assert!(build_config(&parse(&["-c", "100", "localhost:443"]), &settings).is_ok());

        let err = build_config(&parse(&["-c", "101", "localhost:443"]), &settings).unwrap_err();
        assert!(err.to_string().contains("cannot exceed 100"));
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = parse(&["--tcponly", "--insecure", "--ip", "::1", "[::1]:443"]);
        let config = build_config(&cli, &AppSettings::default()).unwrap();
        assert!(config.tcp_only);
        assert!(config.insecure_skip_verify);
        assert_eq!(config.ip, Some("::1".parse().unwrap()));
    }

    #[test]
    fn test_missing_ca_file() {
        let cli = parse(&["--ca", "/nonexistent/ca.pem", "localhost:443"]);
        let err = build_config(&cli, &AppSettings::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("error loading CA certificates"));
    }
}
