//! Sample accumulator reporting avg/min/max/count

use crate::metrics::clock::{Clock, SystemClock, whole_seconds_between};
use crate::metrics::metric::Metric;

use chrono::{DateTime, Utc};

/// Statistical summary of the samples measured in the current window
#[derive(Debug, Clone)]
pub struct Summary<C: Clock = SystemClock> {
    name: String,
    tags: Vec<String>,
    sum: f64,
    sample_count: u64,
    min: Option<f64>,
    max: Option<f64>,
    start_time: DateTime<Utc>,
    clock: C,
}

impl Summary {
    pub fn new(name: impl Into<String>, tags: Vec<String>) -> Self {
        Self::with_clock(name, tags, SystemClock)
    }
}

impl<C: Clock> Summary<C> {
    pub fn with_clock(name: impl Into<String>, tags: Vec<String>, clock: C) -> Self {
        let start_time = clock.now();
        Self {
            name: name.into(),
            tags,
            sum: 0.0,
            sample_count: 0,
            min: None,
            max: None,
            start_time,
            clock,
        }
    }

    /// Record one sample
    pub fn measure(&mut self, value: f64) {
        self.sum += value;
        self.sample_count += 1;

        self.min = Some(match self.min {
            Some(min) if min <= value => min,
            _ => value,
        });

        self.max = Some(match self.max {
            Some(max) if max >= value => max,
            _ => value,
        });
    }

    /// Report `[avg, min, max, count]`, or nothing for an empty window.
    ///
    /// All four metrics share the interval and time captured on entry.
    pub fn report(&self) -> Vec<Metric> {
        if self.sample_count == 0 {
            return Vec::new();
        }
        let (Some(min), Some(max)) = (self.min, self.max) else {
            return Vec::new();
        };

        let now = self.clock.now();
        let interval = whole_seconds_between(self.start_time, now);
        let avg = self.sum / self.sample_count as f64;

        [
            ("avg", avg),
            ("min", min),
            ("max", max),
            ("count", self.sample_count as f64),
        ]
        .into_iter()
        .map(|(stat, value)| {
            Metric::at(
                format!("{}.{}", self.name, stat),
                interval,
                value,
                self.tags.clone(),
                &self.clock,
                now,
            )
        })
        .collect()
    }

    /// Clear all samples and reopen the window
    pub fn reset(&mut self) {
        self.start_time = self.clock.now();
        self.sum = 0.0;
        self.sample_count = 0;
        self.min = None;
        self.max = None;
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }
}
