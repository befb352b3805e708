//! Configuration management for the pingmon monitor
//!
//! This module provides a clean, layered approach to configuration:
//! - Core structures
//! - CLI argument parsing
//! - Configuration validation
//! - Default value management

pub mod defaults;
pub mod parser;
pub mod validation;

use crate::errors::Result;
use crate::publisher::{Credentials, PublisherConfig};
use std::time::Duration;
use tracing::info;
use url::Url;

/// Monitored host
#[derive(Debug, Clone)]
pub struct TargetConfig {
    pub host: String,
}

/// Probe batch configuration
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub count: u32,
    pub ping_binary: String,
    pub timeout: Duration,
}

/// Ingestion endpoint configuration
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub endpoint: String,
    pub user_id: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub metric_prefix: String,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub verbose: bool,
}

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    pub target: TargetConfig,
    pub probe: ProbeConfig,
    pub publish: PublishConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Parse and validate configuration from command line arguments
    pub fn from_args() -> Result<Self> {
        let raw_config = parser::RawConfig::parse_from_args()?;
        let config = raw_config.try_into()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Credentials, when both halves are configured
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.publish.user_id, &self.publish.api_key) {
            (Some(user_id), Some(api_key)) => Some(Credentials {
                user_id: user_id.clone(),
                api_key: api_key.clone(),
            }),
            _ => None,
        }
    }

    /// Build the publisher configuration
    pub fn publisher_config(&self) -> Result<PublisherConfig> {
        Ok(PublisherConfig {
            endpoint: Url::parse(&self.publish.endpoint)?,
            credentials: self.credentials(),
            timeout: self.publish.timeout,
        })
    }

    /// Log configuration summary
    pub fn print_summary(&self) {
        info!("Target:           {}", self.target.host);
        info!("Pings per batch:  {}", self.probe.count);
        info!("Ping binary:      {}", self.probe.ping_binary);
        info!("Probe timeout:    {}s", self.probe.timeout.as_secs());
        info!("Endpoint:         {}", self.publish.endpoint);
        info!("Publish timeout:  {}s", self.publish.timeout.as_secs());
        info!("Metric prefix:    {}", self.publish.metric_prefix);

        match self.credentials() {
            Some(credentials) => info!("Credentials:      user {}", credentials.user_id),
            None => info!("Credentials:      none (unauthenticated)"),
        }
    }
}
