//! Reporting windows (today/week/month/all) on the local calendar.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::TimeEntry;
use crate::types::ValidationError;

/// The selected reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Today,
    #[default]
    Week,
    Month,
    All,
}

impl TimeRange {
    pub const ALL: [Self; 4] = [Self::Today, Self::Week, Self::Month, Self::All];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    /// Inclusive UTC bounds of this range as seen from `now`'s local calendar.
    ///
    /// Returns `None` for [`TimeRange::All`], which has no bounds.
    pub fn window<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Option<RangeWindow> {
        let tz = now.timezone();
        let today = now.date_naive();
        let first_day = match self {
            Self::All => return None,
            Self::Today => today,
            // Monday-based week: Sunday is day 6.
            Self::Week => today - Duration::days(i64::from(today.weekday().num_days_from_monday())),
            Self::Month => today - Duration::days(i64::from(today.day0())),
        };

        Some(RangeWindow {
            start: local_midnight_to_utc(&tz, first_day),
            end: end_of_day(&tz, today),
        })
    }

    /// Whether `instant` falls inside this range relative to `now`.
    pub fn contains<Tz: TimeZone>(self, instant: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        self.window(now).is_none_or(|w| w.contains(instant))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            _ => Err(ValidationError::InvalidRange {
                value: s.to_string(),
            }),
        }
    }
}

/// Inclusive bounds of a bounded [`TimeRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RangeWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Entries whose start falls inside `range`, in input order.
pub fn entries_in_range<'a, Tz: TimeZone>(
    entries: impl IntoIterator<Item = &'a TimeEntry>,
    range: TimeRange,
    now: &DateTime<Tz>,
) -> Vec<&'a TimeEntry> {
    match range.window(now) {
        None => entries.into_iter().collect(),
        Some(window) => entries
            .into_iter()
            .filter(|entry| window.contains(entry.start))
            .collect(),
    }
}

/// Converts a local wall-clock time to UTC.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times in a
/// DST gap move forward to the first hour that exists.
pub(crate) fn local_to_utc<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    (0..3)
        .find_map(|hours| {
            tz.from_local_datetime(&(local + Duration::hours(hours)))
                .earliest()
        })
        .map_or_else(|| local.and_utc(), |dt| dt.with_timezone(&Utc))
}

fn local_midnight_to_utc<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    local_to_utc(tz, date.and_time(chrono::NaiveTime::MIN))
}

/// Last millisecond of `date` in local time (23:59:59.999).
fn end_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    local_midnight_to_utc(tz, date + Duration::days(1)) - Duration::milliseconds(1)
}
