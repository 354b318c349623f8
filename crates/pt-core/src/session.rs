//! Open clock sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{TimeEntry, minutes_between};
use crate::types::{EmployeeId, EntryId, EntryType, SessionId};

/// An open-ended interval started by clocking in.
///
/// At most one session per employee is open at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockSession {
    pub id: SessionId,
    pub employee_id: EmployeeId,
    pub project: String,
    pub clock_in: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ClockSession {
    /// Minutes elapsed since clock-in, floored at 0.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        minutes_between(self.clock_in, now)
    }

    /// Closes the session at `clock_out`, producing a clock entry.
    pub(crate) fn into_entry(self, id: EntryId, clock_out: DateTime<Utc>) -> TimeEntry {
        TimeEntry {
            id,
            duration_minutes: minutes_between(self.clock_in, clock_out),
            employee_id: self.employee_id,
            project: self.project,
            start: self.clock_in,
            end: clock_out,
            notes: self.notes,
            entry_type: EntryType::Clock,
        }
    }
}
