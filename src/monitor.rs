//! Driving loop: probe, aggregate, publish, repeat

use crate::errors::Result;
use crate::metrics::PingMetrics;
use crate::metrics::clock::{Clock, SystemClock};
use crate::probe::{ProbeBatch, ProbeOutcome, Prober};
use crate::publisher::Publisher;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// What a single cycle ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The backend accepted this many metrics and the windows were reset
    Published(usize),
    /// Publishing failed; the windows keep their data for the next cycle
    PublishFailed,
    /// Interrupted while probing; nothing was recorded
    Cancelled,
}

/// Owns the accumulators for one host and runs cycles against them
pub struct Monitor<P, B, C: Clock = SystemClock> {
    metrics: PingMetrics<C>,
    prober: P,
    publisher: B,
    cycles: u64,
    // Consecutive failures, reset on the next success
    failed_batches: u32,
    failed_publishes: u32,
}

impl<P, B, C> Monitor<P, B, C>
where
    P: Prober,
    B: Publisher,
    C: Clock,
{
    pub fn new(metrics: PingMetrics<C>, prober: P, publisher: B) -> Self {
        Self {
            metrics,
            prober,
            publisher,
            cycles: 0,
            failed_batches: 0,
            failed_publishes: 0,
        }
    }

    /// Run cycles back to back until `cancel` fires.
    ///
    /// There is no pause between cycles: the ping batch itself paces the
    /// loop. A prober that fails immediately makes the loop spin as fast as
    /// the publisher accepts reports.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        info!("Starting monitor loop");

        while !cancel.is_cancelled() {
            if self.run_cycle(&cancel).await == CycleOutcome::Cancelled {
                break;
            }
        }

        info!("Monitor stopped after {} cycles", self.cycles);
        Ok(())
    }

    /// Probe one batch, record it, publish, and reset only if the publish succeeded
    pub async fn run_cycle(&mut self, cancel: &CancellationToken) -> CycleOutcome {
        let batch = match self.prober.probe(cancel).await {
            Ok(ProbeOutcome::Completed(batch)) => {
                if self.failed_batches > 0 {
                    info!("Probe recovered after {} failed batches", self.failed_batches);
                    self.failed_batches = 0;
                }
                batch
            }
            Ok(ProbeOutcome::Cancelled) => return CycleOutcome::Cancelled,
            Err(e) => {
                // Warn once per streak
                if self.failed_batches == 0 {
                    warn!("Probe failed, counting every attempt as lost: {}", e);
                } else {
                    debug!("Probe still failing ({} in a row): {}", self.failed_batches + 1, e);
                }
                self.failed_batches = self.failed_batches.saturating_add(1);
                ProbeBatch::failed(self.prober.attempts())
            }
        };

        self.cycles += 1;
        debug!(
            "Cycle {}: {} attempts, {} replies",
            self.cycles,
            batch.attempts,
            batch.successes()
        );
        self.metrics.record_batch(&batch);

        let report = self.metrics.report();
        match self.publisher.publish(&report).await {
            Ok(()) => {
                self.metrics.reset();
                self.failed_publishes = 0;
                info!(
                    "Cycle {}: published {} metrics ({} of {} replies)",
                    self.cycles,
                    report.len(),
                    batch.successes(),
                    batch.attempts
                );
                CycleOutcome::Published(report.len())
            }
            Err(e) => {
                self.failed_publishes = self.failed_publishes.saturating_add(1);
                error!(
                    "Failed to publish metrics ({} in a row), keeping them for the next cycle: {}",
                    self.failed_publishes, e
                );
                CycleOutcome::PublishFailed
            }
        }
    }

    pub fn metrics(&self) -> &PingMetrics<C> {
        &self.metrics
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Batches in a row that failed to run at all
    pub fn failed_batches(&self) -> u32 {
        self.failed_batches
    }

    /// Publishes in a row that the backend did not accept
    pub fn failed_publishes(&self) -> u32 {
        self.failed_publishes
    }
}
