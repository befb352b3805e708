//! Additive integer accumulator

use crate::metrics::clock::{Clock, SystemClock, whole_seconds_between};
use crate::metrics::metric::Metric;

use chrono::{DateTime, Utc};

/// Running integer total over a reporting window.
///
/// `report` and `reset` are independent: a counter that is reported but
/// never reset keeps a running total across windows.
#[derive(Debug, Clone)]
pub struct Counter<C: Clock = SystemClock> {
    name: String,
    tags: Vec<String>,
    value: i64,
    start_time: DateTime<Utc>,
    clock: C,
}

impl Counter {
    pub fn new(name: impl Into<String>, tags: Vec<String>) -> Self {
        Self::with_initial(name, tags, 0)
    }

    pub fn with_initial(name: impl Into<String>, tags: Vec<String>, initial_value: i64) -> Self {
        Self::with_clock(name, tags, initial_value, SystemClock)
    }
}

impl<C: Clock> Counter<C> {
    pub fn with_clock(
        name: impl Into<String>,
        tags: Vec<String>,
        initial_value: i64,
        clock: C,
    ) -> Self {
        let start_time = clock.now();
        Self {
            name: name.into(),
            tags,
            value: initial_value,
            start_time,
            clock,
        }
    }

    /// Add `delta` to the running value.
    ///
    /// Saturates at `i64::MIN`/`i64::MAX` instead of wrapping or panicking.
    pub fn measure(&mut self, delta: i64) {
        self.value = self.value.saturating_add(delta);
    }

    /// Report the current value as a single `{name}.c` metric
    pub fn report(&self) -> Vec<Metric> {
        let interval = whole_seconds_between(self.start_time, self.clock.now());
        vec![Metric::create(
            format!("{}.c", self.name),
            interval,
            self.value as f64,
            self.tags.clone(),
            &self.clock,
        )]
    }

    /// Reopen the window with a fresh value
    pub fn reset(&mut self, new_initial_value: i64) {
        self.start_time = self.clock.now();
        self.value = new_initial_value;
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}
