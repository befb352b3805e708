//! Time source used to stamp metrics and measure window age

use chrono::{DateTime, Utc};

/// The fixed reference instant, 1970-01-01T00:00:00Z
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Whole seconds from `start` to `end`, rounded towards negative infinity
pub fn whole_seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_milliseconds().div_euclid(1000)
}

/// Source of the current instant
pub trait Clock {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;

    /// Reference epoch used for metric timestamps
    fn epoch(&self) -> DateTime<Utc> {
        epoch()
    }

    /// Seconds elapsed between the epoch and now
    fn unix_seconds(&self) -> i64 {
        whole_seconds_between(self.epoch(), self.now())
    }
}

/// Wall clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use chrono::{DateTime, Duration, Utc};
    use std::sync::{Arc, Mutex};

    /// Clock pinned to an instant that tests move explicitly.
    /// Clones share the same instant.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        pub fn at_unix(seconds: i64) -> Self {
            let now = DateTime::from_timestamp(seconds, 0).expect("timestamp in range");
            Self {
                now: Arc::new(Mutex::new(now)),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().expect("clock lock poisoned");
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().expect("clock lock poisoned")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_epoch_is_unix_epoch() {
        let expected = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(epoch(), expected);
        assert_eq!(SystemClock.epoch(), expected);
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        assert!(SystemClock.unix_seconds() > 1_600_000_000);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::at_unix(1_700_000_000);
        let other = clock.clone();

        clock.advance(Duration::seconds(30));

        assert_eq!(other.unix_seconds(), 1_700_000_030);
    }

    #[test]
    fn test_whole_seconds_floor() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        assert_eq!(
            whole_seconds_between(start, start + Duration::milliseconds(59_999)),
            59
        );
        assert_eq!(
            whole_seconds_between(start, start - Duration::milliseconds(500)),
            -1
        );
    }
}
