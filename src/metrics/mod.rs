//! Metric aggregation for the pingmon monitor
//!
//! This module turns a raw stream of probe measurements into periodic,
//! resettable reports:
//! - A clock abstraction for timestamps and window ages
//! - The immutable `Metric` data point
//! - `Counter` and `Summary` accumulators
//! - The per-host set of accumulators driven by the monitor

pub mod clock;
pub mod counter;
pub mod metric;
pub mod ping;
pub mod summary;

// Re-export public types for easier access
pub use metric::Metric;
pub use ping::PingMetrics;
