//! Command-line argument parsing for pingmon configuration

use clap::Parser;
use std::time::Duration;

use super::defaults::Defaults;
use super::{Config, OutputConfig, ProbeConfig, PublishConfig, TargetConfig};
use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_METRIC_PREFIX, DEFAULT_PING_BINARY};
use crate::errors::{ErrorContext, PingmonError, Result};

/// Raw configuration from command line arguments
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pingmon",
    version,
    about = "Continuously ping a host and publish reachability and latency metrics",
    long_about = None
)]
pub struct RawConfig {
    /// Host to continuously ping
    #[arg(value_name = "HOST", help = "Host to continuously ping")]
    pub host: String,

    /// Pings per batch
    #[arg(
        short = 'c',
        long = "count",
        value_name = "COUNT",
        default_value_t = Defaults::PING_COUNT,
        help = "Number of pings to send each batch"
    )]
    pub count: u32,

    /// Ingestion endpoint
    #[arg(
        short = 'e',
        long = "endpoint",
        value_name = "URL",
        env = "PINGMON_ENDPOINT",
        default_value = DEFAULT_ENDPOINT,
        help = "Graphite-compatible JSON ingestion endpoint"
    )]
    pub endpoint: String,

    /// Ingestion user id
    #[arg(
        short = 'u',
        long = "user-id",
        value_name = "ID",
        env = "PINGMON_USER_ID",
        help = "User id for bearer authentication"
    )]
    pub user_id: Option<String>,

    /// Ingestion API key
    #[arg(
        short = 'k',
        long = "api-key",
        value_name = "KEY",
        env = "PINGMON_API_KEY",
        hide_env_values = true,
        help = "API key for bearer authentication"
    )]
    pub api_key: Option<String>,

    /// Metric name prefix
    #[arg(
        long = "prefix",
        value_name = "PREFIX",
        default_value = DEFAULT_METRIC_PREFIX,
        help = "Dotted prefix for every published metric name"
    )]
    pub prefix: String,

    /// Ping executable
    #[arg(
        long = "ping-binary",
        value_name = "PATH",
        default_value = DEFAULT_PING_BINARY,
        help = "Ping executable to run for each batch"
    )]
    pub ping_binary: String,

    /// Probe timeout
    #[arg(
        long = "probe-timeout",
        value_name = "DURATION",
        default_value = Defaults::PROBE_TIMEOUT,
        help = "Upper bound for one ping batch (e.g., '60s', '2m')"
    )]
    pub probe_timeout: String,

    /// Publish timeout
    #[arg(
        long = "publish-timeout",
        value_name = "DURATION",
        default_value = Defaults::PUBLISH_TIMEOUT,
        help = "Upper bound for one publish request (e.g., '10s')"
    )]
    pub publish_timeout: String,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose", help = "Enable verbose logging")]
    pub verbose: bool,
}

impl RawConfig {
    /// Parse from command line arguments
    pub fn parse_from_args() -> Result<Self> {
        Ok(Self::parse())
    }

    /// Parse duration string with time suffixes (s/m/h)
    fn parse_duration(duration_str: &str) -> Result<Duration> {
        let duration_str = duration_str.trim();

        let Some(last_char) = duration_str.chars().last() else {
            return Err(PingmonError::config("Duration cannot be empty"));
        };

        let (number_part, multiplier) = match last_char {
            's' | 'S' => (&duration_str[..duration_str.len() - 1], 1),
            'm' | 'M' => (&duration_str[..duration_str.len() - 1], 60),
            'h' | 'H' => (&duration_str[..duration_str.len() - 1], 3600),
            // No suffix, assume seconds
            _ => (duration_str, 1),
        };

        let value = number_part
            .trim()
            .parse::<u64>()
            .with_config_context(&format!("Invalid duration format: '{}'", duration_str))?;

        Ok(Duration::from_secs(value * multiplier))
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = PingmonError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let probe_timeout = RawConfig::parse_duration(&raw.probe_timeout)?;
        let publish_timeout = RawConfig::parse_duration(&raw.publish_timeout)?;

        Ok(Config {
            target: TargetConfig {
                host: raw.host.trim().to_string(),
            },
            probe: ProbeConfig {
                count: raw.count,
                ping_binary: raw.ping_binary,
                timeout: probe_timeout,
            },
            publish: PublishConfig {
                endpoint: raw.endpoint,
                user_id: raw.user_id.filter(|id| !id.is_empty()),
                api_key: raw.api_key.filter(|key| !key.is_empty()),
                timeout: publish_timeout,
                metric_prefix: raw.prefix,
            },
            output: OutputConfig {
                verbose: raw.verbose,
            },
        })
    }
}
