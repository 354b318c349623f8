//! Sources of "now" for the store.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, FixedOffset, Local, Offset, TimeZone};

/// Provides the current instant in the operator's local time zone.
///
/// The zone matters: range windows follow the local calendar.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;

    /// Label for the zone range windows are computed in. Defaults to the
    /// current UTC offset, e.g. `+01:00`.
    fn zone_name(&self) -> String {
        self.now().offset().fix().to_string()
    }
}

/// Wall clock in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    /// The IANA name (`Europe/Paris`), or the offset if the OS won't say.
    fn zone_name(&self) -> String {
        iana_time_zone::get_timezone().unwrap_or_else(|err| {
            tracing::debug!(error = %err, "no IANA zone name, using offset");
            self.now().offset().fix().to_string()
        })
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep a handle after moving
/// the clock into a store.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<FixedOffset>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    type Tz = FixedOffset;

    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_time() {
        let start = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 12, 9, 0, 0)
            .unwrap();
        let clock = ManualClock::new(start);
        let handle = clock.clone();

        handle.advance(Duration::minutes(90));
        assert_eq!(clock.now(), start + Duration::minutes(90));

        handle.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn manual_clock_names_its_offset() {
        let at = |secs| {
            FixedOffset::east_opt(secs)
                .unwrap()
                .with_ymd_and_hms(2025, 3, 12, 9, 0, 0)
                .unwrap()
        };
        assert_eq!(ManualClock::new(at(0)).zone_name(), "+00:00");
        assert_eq!(ManualClock::new(at(-5 * 3600)).zone_name(), "-05:00");
    }

    #[test]
    fn system_clock_has_a_zone_name() {
        assert!(!SystemClock.zone_name().is_empty());
    }
}
