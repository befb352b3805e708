//! Application-wide constants and configuration values

use std::time::Duration;

// Probe constants
pub const MAX_PINGS_PER_BATCH: u32 = 10_000;
pub const DEFAULT_PING_BINARY: &str = "ping";

// Metric naming
pub const DEFAULT_METRIC_PREFIX: &str = "pingmon.ping";
pub const HOST_TAG: &str = "host";

// Publish endpoint
pub const DEFAULT_ENDPOINT: &str =
    "https://graphite-prod-13-prod-us-east-0.grafana.net/graphite/metrics";

// Timeout constants
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(10);

// Characters that would make a `key=value` tag ambiguous to the backend
pub const TAG_RESERVED_CHARS: &[char] = &['=', ';', ',', ' '];
