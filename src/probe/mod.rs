//! Probe batches feeding the monitor
//!
//! This module provides:
//! - The `Prober` abstraction the monitor drives once per cycle
//! - The batch result type consumed by the accumulators
//! - A `ping` subprocess implementation

pub mod ping;

pub use ping::PingProber;

use crate::errors::Result;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Outcome of one probe batch
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeBatch {
    /// Number of attempts the batch was asked to make
    pub attempts: u32,
    /// Round-trip time of every successful attempt, in milliseconds
    pub rtts_ms: Vec<f64>,
}

impl ProbeBatch {
    pub fn new(attempts: u32, rtts_ms: Vec<f64>) -> Self {
        Self { attempts, rtts_ms }
    }

    /// A batch in which no attempt succeeded
    pub fn failed(attempts: u32) -> Self {
        Self::new(attempts, Vec::new())
    }

    pub fn successes(&self) -> usize {
        self.rtts_ms.len()
    }

    pub fn failures(&self) -> usize {
        (self.attempts as usize).saturating_sub(self.successes())
    }
}

/// Result of waiting for a probe batch
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Completed(ProbeBatch),
    /// The batch was interrupted; its data is discarded
    Cancelled,
}

/// Runs one probe batch against the monitored host
#[async_trait]
pub trait Prober {
    /// Number of attempts made per batch
    fn attempts(&self) -> u32;

    /// Run a batch to completion, or until `cancel` fires
    async fn probe(&self, cancel: &CancellationToken) -> Result<ProbeOutcome>;
}
