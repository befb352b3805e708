//! Configuration validation logic

use super::Config;
use crate::constants::{MAX_PINGS_PER_BATCH, TAG_RESERVED_CHARS};
use crate::errors::{PingmonError, Result};
use url::Url;

/// Validate the configuration
pub fn validate(config: &Config) -> Result<()> {
    validate_target(config)?;
    validate_probe_config(config)?;
    validate_publish_config(config)?;
    validate_credentials(config)?;
    Ok(())
}

/// Validate target configuration
fn validate_target(config: &Config) -> Result<()> {
    let host = &config.target.host;

    if host.is_empty() {
        return Err(PingmonError::config("Host cannot be empty"));
    }

    if host.starts_with('-') {
        return Err(PingmonError::config(format!(
            "Invalid host '{}': must not start with '-'",
            host
        )));
    }

    // The host becomes the value of the `host=` tag
    if host.contains(TAG_RESERVED_CHARS) {
        return Err(PingmonError::config(format!(
            "Invalid host '{}': must not contain any of {:?}",
            host, TAG_RESERVED_CHARS
        )));
    }

    Ok(())
}

/// Validate probe configuration
fn validate_probe_config(config: &Config) -> Result<()> {
    if config.probe.count == 0 {
        return Err(PingmonError::config(
            "Number of pings per batch must be greater than 0",
        ));
    }

    if config.probe.count > MAX_PINGS_PER_BATCH {
        return Err(PingmonError::config(format!(
            "Number of pings per batch cannot exceed {}",
            MAX_PINGS_PER_BATCH
        )));
    }

    if config.probe.ping_binary.trim().is_empty() {
        return Err(PingmonError::config("Ping binary cannot be empty"));
    }

    if config.probe.timeout.is_zero() {
        return Err(PingmonError::config("Probe timeout must be greater than 0"));
    }

    Ok(())
}

/// Validate endpoint, timeout and metric prefix
fn validate_publish_config(config: &Config) -> Result<()> {
    let url = Url::parse(&config.publish.endpoint).map_err(|e| {
        PingmonError::config(format!(
            "Invalid endpoint URL '{}': {}",
            config.publish.endpoint, e
        ))
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(PingmonError::config(format!(
                "Invalid URL scheme '{}' for endpoint. Only 'http' and 'https' are supported",
                scheme
            )));
        }
    }

    if config.publish.timeout.is_zero() {
        return Err(PingmonError::config(
            "Publish timeout must be greater than 0",
        ));
    }

    let prefix = &config.publish.metric_prefix;
    if prefix.is_empty() || prefix.starts_with('.') || prefix.ends_with('.') {
        return Err(PingmonError::config(format!(
            "Invalid metric prefix '{}': must be a non-empty dotted path",
            prefix
        )));
    }

    if prefix.contains(TAG_RESERVED_CHARS) {
        return Err(PingmonError::config(format!(
            "Invalid metric prefix '{}': must not contain any of {:?}",
            prefix, TAG_RESERVED_CHARS
        )));
    }

    Ok(())
}

/// Credentials must be given in full or not at all
fn validate_credentials(config: &Config) -> Result<()> {
    match (&config.publish.user_id, &config.publish.api_key) {
        (Some(_), None) => Err(PingmonError::config(
            "--user-id requires --api-key (or PINGMON_API_KEY)",
        )),
        (None, Some(_)) => Err(PingmonError::config(
            "--api-key requires --user-id (or PINGMON_USER_ID)",
        )),
        _ => Ok(()),
    }
}
