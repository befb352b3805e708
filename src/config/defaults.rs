//! Default values and configuration presets

use super::{Config, OutputConfig, ProbeConfig, PublishConfig, TargetConfig};
use crate::constants::{
    DEFAULT_ENDPOINT, DEFAULT_METRIC_PREFIX, DEFAULT_PING_BINARY, DEFAULT_PROBE_TIMEOUT,
    DEFAULT_PUBLISH_TIMEOUT,
};

/// Default configuration values
pub struct Defaults;

impl Defaults {
    pub const PING_COUNT: u32 = 10;
    pub const PROBE_TIMEOUT: &'static str = "60s";
    pub const PUBLISH_TIMEOUT: &'static str = "10s";
}

impl Config {
    /// Default configuration for monitoring `host` without credentials
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            target: TargetConfig { host: host.into() },
            probe: ProbeConfig {
                count: Defaults::PING_COUNT,
                ping_binary: DEFAULT_PING_BINARY.to_string(),
                timeout: DEFAULT_PROBE_TIMEOUT,
            },
            publish: PublishConfig {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                user_id: None,
                api_key: None,
                timeout: DEFAULT_PUBLISH_TIMEOUT,
                metric_prefix: DEFAULT_METRIC_PREFIX.to_string(),
            },
            output: OutputConfig { verbose: false },
        }
    }

    /// Attach ingestion credentials
    pub fn with_credentials(mut self, user_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.publish.user_id = Some(user_id.into());
        self.publish.api_key = Some(api_key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_for_host_defaults() {
        let config = Config::for_host("example.com");
        assert_eq!(config.target.host, "example.com");
        assert_eq!(config.probe.count, 10);
        assert_eq!(config.probe.timeout, Duration::from_secs(60));
        assert_eq!(config.publish.timeout, Duration::from_secs(10));
        assert_eq!(config.publish.metric_prefix, "pingmon.ping");
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_with_credentials() {
        let config = Config::for_host("h").with_credentials("1", "key");
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.user_id, "1");
        assert_eq!(credentials.api_key, "key");
    }
}
