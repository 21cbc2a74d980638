//! Clock abstraction for deterministic timestamps.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Abstraction over system time so record timestamps and expiry are testable.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// The instant a record written now with `ttl` expires, or `None` if that
    /// is past the representable range.
    fn expires_at(&self, ttl: Duration) -> Option<DateTime<Utc>> {
        let ttl = chrono::Duration::from_std(ttl).ok()?;
        self.now().checked_add_signed(ttl)
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
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

    struct At(DateTime<Utc>);

    impl Clock for At {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_expires_at_adds_ttl_to_now() {
        let clock = At(Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap());

        let expiry = clock.expires_at(Duration::from_secs(24 * 60 * 60));

        assert_eq!(expiry, Some(Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap()));
    }

    #[test]
    fn test_expires_at_is_none_when_out_of_range() {
        let clock = At(DateTime::<Utc>::MAX_UTC);

        assert_eq!(clock.expires_at(Duration::from_secs(1)), None);
    }
}
