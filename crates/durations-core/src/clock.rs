//! Wall-clock time, behind a trait so tests can pin it.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// The tracker reads time in two places: notification timestamps and the
/// ids handed to new GM durations.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current instant as milliseconds since the Unix epoch. GM duration
    /// ids are taken from this.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Reads the host's clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    struct Pinned(DateTime<Utc>);

    impl Clock for Pinned {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_now_millis_counts_from_epoch() {
        let clock = Pinned(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 2).unwrap());

        assert_eq!(clock.now_millis(), 2_000);
    }
}
