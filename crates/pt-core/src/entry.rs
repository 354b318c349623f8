//! Finalized time entries and duration arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EmployeeId, EntryId, EntryType};

/// Minutes between two instants, rounded to the nearest minute (half up).
///
/// Never negative: an end before the start yields 0.
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let ms = (end - start).num_milliseconds();
    if ms <= 0 {
        return 0;
    }
    (ms + 30_000) / 60_000
}

/// A bounded work interval with a computed duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: EntryId,
    /// Not checked against the roster; may dangle after edits.
    pub employee_id: EmployeeId,
    pub project: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl TimeEntry {
    /// Duration in fractional hours.
    #[expect(
        clippy::cast_precision_loss,
        reason = "minute counts stay far below 2^52"
    )]
    pub fn hours(&self) -> f64 {
        self.duration_minutes as f64 / 60.0
    }
}

/// A manual entry submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntry {
    pub employee_id: EmployeeId,
    pub project: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub notes: Option<String>,
}

/// A partial update to a time entry. `None` fields are left untouched.
///
/// Setting `start` or `end` recomputes the duration, overriding any explicit
/// `duration_minutes` in the same update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[expect(
    clippy::option_option,
    reason = "notes distinguishes untouched from cleared"
)]
pub struct EntryUpdate {
    pub employee_id: Option<EmployeeId>,
    pub project: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<Option<String>>,
    pub entry_type: Option<EntryType>,
}

impl EntryUpdate {
    pub(crate) fn apply_to(self, entry: &mut TimeEntry) {
        let bounds_changed = self.start.is_some() || self.end.is_some();

        if let Some(employee_id) = self.employee_id {
            entry.employee_id = employee_id;
        }
        if let Some(project) = self.project {
            entry.project = project;
        }
        if let Some(start) = self.start {
            entry.start = start;
        }
        if let Some(end) = self.end {
            entry.end = end;
        }
        if let Some(minutes) = self.duration_minutes {
            entry.duration_minutes = minutes.max(0);
        }
        if let Some(notes) = self.notes {
            entry.notes = notes;
        }
        if let Some(entry_type) = self.entry_type {
            entry.entry_type = entry_type;
        }

        if bounds_changed {
            entry.duration_minutes = minutes_between(entry.start, entry.end);
        }
    }
}

/// Narrows a list of entries by employee and/or type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub employee_id: Option<EmployeeId>,
    pub entry_type: Option<EntryType>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &TimeEntry) -> bool {
        self.employee_id
            .as_ref()
            .is_none_or(|id| &entry.employee_id == id)
            && self.entry_type.is_none_or(|t| entry.entry_type == t)
    }

    pub fn apply<'a>(&self, entries: impl IntoIterator<Item = &'a TimeEntry>) -> Vec<&'a TimeEntry> {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}
