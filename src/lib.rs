//! pingmon - continuous ping monitor
//!
//! Probes a host with the system `ping` utility, aggregates the replies into
//! per-window statistics and publishes them to a Graphite-compatible JSON
//! ingestion endpoint.
//!
//! # Architecture
//!
//! - **Metrics**: `Counter` and `Summary` accumulators producing `Metric` reports
//! - **Probe**: one `ping` batch per cycle
//! - **Publisher**: JSON-over-HTTP transmission of each report
//! - **Monitor**: the probe/aggregate/publish loop, reset only on successful publish

pub mod config;
pub mod constants;
pub mod errors;
pub mod metrics;
pub mod monitor;
pub mod probe;
pub mod publisher;

pub use errors::{PingmonError, Result};
pub use metrics::counter::Counter;
pub use metrics::summary::Summary;
pub use metrics::{Metric, PingMetrics};
pub use monitor::{CycleOutcome, Monitor};
pub use probe::{PingProber, ProbeBatch, ProbeOutcome, Prober};
pub use publisher::{GraphitePublisher, Publisher};
