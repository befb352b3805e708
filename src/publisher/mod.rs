//! Transmission of reported metrics to the ingestion backend
//!
//! - `Publisher`: the seam the monitor publishes through
//! - `GraphitePublisher`: JSON-over-HTTP implementation

pub mod graphite;

pub use graphite::{Credentials, GraphitePublisher, PublisherConfig};

use crate::errors::Result;
use crate::metrics::Metric;

use async_trait::async_trait;

/// Sends one batch of metrics; `Ok` means the backend accepted all of them
#[async_trait]
pub trait Publisher {
    async fn publish(&self, metrics: &[Metric]) -> Result<()>;
}
