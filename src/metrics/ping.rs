//! Accumulators tracked for one pinged host

use crate::constants::HOST_TAG;
use crate::metrics::clock::{Clock, SystemClock};
use crate::metrics::counter::Counter;
use crate::metrics::metric::Metric;
use crate::metrics::summary::Summary;
use crate::probe::ProbeBatch;

/// Attempt counters and round-trip summary for a single host
#[derive(Debug, Clone)]
pub struct PingMetrics<C: Clock = SystemClock> {
    pub total: Counter<C>,
    pub success: Counter<C>,
    pub failure: Counter<C>,
    pub rtt: Summary<C>,
}

impl PingMetrics {
    pub fn new(prefix: &str, host: &str) -> Self {
        Self::with_clock(prefix, host, SystemClock)
    }
}

impl<C: Clock + Clone> PingMetrics<C> {
    pub fn with_clock(prefix: &str, host: &str, clock: C) -> Self {
        let tags = vec![Metric::tag(HOST_TAG, host)];
        Self {
            total: Counter::with_clock(format!("{prefix}.total"), tags.clone(), 0, clock.clone()),
            success: Counter::with_clock(
                format!("{prefix}.success"),
                tags.clone(),
                0,
                clock.clone(),
            ),
            failure: Counter::with_clock(
                format!("{prefix}.failure"),
                tags.clone(),
                0,
                clock.clone(),
            ),
            rtt: Summary::with_clock(format!("{prefix}.rtt"), tags, clock),
        }
    }
}

impl<C: Clock> PingMetrics<C> {
    /// Feed a completed probe batch into every accumulator
    pub fn record_batch(&mut self, batch: &ProbeBatch) {
        self.total.measure(i64::from(batch.attempts));
        self.success.measure(batch.successes() as i64);
        self.failure.measure(batch.failures() as i64);

        for rtt in &batch.rtts_ms {
            self.rtt.measure(*rtt);
        }
    }

    /// Report total, success, failure and rtt, in that order
    pub fn report(&self) -> Vec<Metric> {
        let mut metrics = self.total.report();
        metrics.extend(self.success.report());
        metrics.extend(self.failure.report());
        metrics.extend(self.rtt.report());
        metrics
    }

    /// Reopen the window on every accumulator
    pub fn reset(&mut self) {
        self.total.reset(0);
        self.success.reset(0);
        self.failure.reset(0);
        self.rtt.reset();
    }
}
