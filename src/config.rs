// src/config.rs

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, ensure};
use std::time::Duration;
use url::Url;

/// Command-line flags. Every flag can also come from the environment.
#[derive(Debug, Parser)]
#[command(name = "clarity-console", version, about = "Terminal dashboard for scans, assets and findings")]
pub struct Args {
    /// Base URL of the backend REST API.
    #[arg(long, env = "CLARITY_API_URL", default_value = "http://localhost:8888/api")]
    pub api_url: String,

    /// Rows per page in the configuration and scan tables.
    #[arg(long, env = "CLARITY_PAGE_SIZE", default_value_t = 50)]
    pub page_size: usize,

    /// Per-request timeout in seconds.
    #[arg(long, env = "CLARITY_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// How long the UI waits for input before redrawing, in milliseconds.
    #[arg(long, env = "CLARITY_TICK_RATE_MS", default_value_t = 100)]
    pub tick_rate_ms: u64,

    /// Route to open on startup (e.g. `/configs`).
    #[arg(long, env = "CLARITY_START_PATH", default_value = "/")]
    pub start_path: String,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub page_size: usize,
    pub request_timeout: Duration,
    pub tick_rate: Duration,
    pub start_path: String,
}

impl TryFrom<Args> for Config {
    type Error = color_eyre::eyre::Report;

    fn try_from(args: Args) -> Result<Self> {
        let api_url = Url::parse(&args.api_url)
            .wrap_err_with(|| format!("Invalid API URL '{}'", args.api_url))?;
        ensure!(!api_url.cannot_be_a_base(), "API URL '{}' cannot be used as a base", api_url);
        ensure!(args.page_size > 0, "Page size must be greater than zero");
        ensure!(args.tick_rate_ms > 0, "Tick rate must be greater than zero");

        Ok(Self {
            api_url,
            page_size: args.page_size,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            tick_rate: Duration::from_millis(args.tick_rate_ms),
            start_path: args.start_path,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Url::parse("http://localhost:8888/api").expect("static URL is valid"),
            page_size: 50,
            request_timeout: Duration::from_secs(10),
            tick_rate: Duration::from_millis(100),
            start_path: "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Config> {
        let mut full = vec!["clarity-console"];
        full.extend_from_slice(argv);
        Config::try_from(Args::try_parse_from(full)?)
    }

    #[test]
    fn defaults_are_valid() {
        let config = parse(&[]).expect("defaults parse");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.start_path, "/");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(parse(&["--page-size", "0"]).is_err());
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(parse(&["--api-url", "not a url"]).is_err());
        assert!(parse(&["--api-url", "mailto:ops@example.com"]).is_err());
    }
}
