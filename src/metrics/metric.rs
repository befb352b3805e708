//! Reported metric data point

use crate::metrics::clock::{Clock, whole_seconds_between};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One immutable data point as sent to the ingestion backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    name: String,
    interval: i64,
    value: f64,
    tags: Vec<String>,
    time: i64,
}

impl Metric {
    /// Create a metric stamped with the clock's current time
    pub fn create<C: Clock + ?Sized>(
        name: impl Into<String>,
        interval: i64,
        value: f64,
        tags: Vec<String>,
        clock: &C,
    ) -> Self {
        Self::with_time(name, interval, value, tags, clock.unix_seconds())
    }

    /// Create a metric for an instant that was already captured
    pub fn at<C: Clock + ?Sized>(
        name: impl Into<String>,
        interval: i64,
        value: f64,
        tags: Vec<String>,
        clock: &C,
        now: DateTime<Utc>,
    ) -> Self {
        let time = whole_seconds_between(clock.epoch(), now);
        Self::with_time(name, interval, value, tags, time)
    }

    fn with_time(
        name: impl Into<String>,
        interval: i64,
        value: f64,
        tags: Vec<String>,
        time: i64,
    ) -> Self {
        Self {
            name: name.into(),
            interval,
            value,
            tags,
            time,
        }
    }

    /// Format a `key=value` tag. Neither part is escaped.
    pub fn tag(key: &str, value: &str) -> String {
        format!("{}={}", key, value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> i64 {
        self.interval
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn time(&self) -> i64 {
        self.time
    }
}
