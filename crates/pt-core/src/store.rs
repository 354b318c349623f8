//! The time-tracking store: single owner of roster, entries and sessions.
//!
//! All mutation goes through [`TimeTrackingStore`] methods. None of them fail:
//! an operation that cannot apply (unknown ID, duplicate clock-in, unusable
//! rate, empty interval) leaves the state untouched and reports [`Outcome::Ignored`].
//! Every applied mutation is written to the [`KeyValueStore`] right away;
//! write failures are logged and otherwise ignored.
//!
//! Derived views ([`TimeTrackingStore::metrics`],
//! [`TimeTrackingStore::entries_for_range`]) are recomputed on every call.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use crate::employee::{Employee, EmployeeUpdate, NewEmployee, is_valid_rate};
use crate::entry::{EntryUpdate, ManualEntry, TimeEntry, minutes_between};
use crate::metrics::DashboardMetrics;
use crate::range::{TimeRange, entries_in_range};
use crate::seed;
use crate::session::ClockSession;
use crate::state::{STORAGE_KEY, TrackingState, load_state};
use crate::storage::KeyValueStore;
use crate::types::{EmployeeId, EmployeeStatus, EntryId, EntryType, SessionId};

/// Display name for entries whose employee no longer resolves.
pub const UNKNOWN_EMPLOYEE: &str = "Unknown employee";

/// Why a mutation left the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unknown employee {0}")]
    UnknownEmployee(EmployeeId),

    #[error("unknown entry {0}")]
    UnknownEntry(EntryId),

    #[error("unknown session {0}")]
    UnknownSession(SessionId),

    #[error("employee {employee_id} is already clocked in (session {session_id})")]
    SessionAlreadyOpen {
        employee_id: EmployeeId,
        session_id: SessionId,
    },

    #[error("employee {0} has no open session")]
    NoOpenSession(EmployeeId),

    #[error("hourly rate for employee {0} must be a finite, non-negative number")]
    InvalidRate(EmployeeId),

    #[error("entry from {start} to {end} lasts {minutes} minutes")]
    EmptyInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        minutes: i64,
    },
}

/// Result of a mutation: applied (with any new ID) or ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    Applied(T),
    Ignored(Rejection),
}

impl<T> Outcome<T> {
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Ignored(_) => None,
        }
    }

    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Applied(_) => None,
            Self::Ignored(reason) => Some(reason),
        }
    }

    pub fn into_result(self) -> Result<T, Rejection> {
        match self {
            Self::Applied(value) => Ok(value),
            Self::Ignored(reason) => Err(reason),
        }
    }
}

/// Owns the tracking state, the selected range, the clock and the storage.
pub struct TimeTrackingStore<S: KeyValueStore, C: Clock = SystemClock> {
    state: TrackingState,
    range: TimeRange,
    storage: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> TimeTrackingStore<S, C> {
    /// Loads state from `storage` (falling back to the seed dataset) and
    /// writes it back, so storage always holds a valid state afterwards.
    pub fn open(storage: S, clock: C) -> Self {
        let state = load_state(&storage, &clock.now());
        let mut store = Self::with_state(state, storage, clock);
        store.persist();
        store
    }

    /// Wraps an existing state without touching storage.
    pub fn with_state(state: TrackingState, storage: S, clock: C) -> Self {
        Self {
            state,
            range: TimeRange::default(),
            storage,
            clock,
        }
    }

    // ========== Reads ==========

    pub fn employees(&self) -> &[Employee] {
        &self.state.employees
    }

    /// All entries, newest insertions first.
    pub fn entries(&self) -> &[TimeEntry] {
        &self.state.entries
    }

    pub fn sessions(&self) -> &[ClockSession] {
        &self.state.sessions
    }

    pub const fn state(&self) -> &TrackingState {
        &self.state
    }

    pub const fn range(&self) -> TimeRange {
        self.range
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now().with_timezone(&Utc)
    }

    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.state.employees.iter().find(|e| &e.id == id)
    }

    /// The employee's name, or [`UNKNOWN_EMPLOYEE`].
    pub fn employee_name(&self, id: &EmployeeId) -> &str {
        self.employee(id).map_or(UNKNOWN_EMPLOYEE, |e| e.name.as_str())
    }

    /// Employees ordered active first, then by name.
    pub fn roster(&self) -> Vec<&Employee> {
        let mut roster: Vec<_> = self.state.employees.iter().collect();
        roster.sort_by_cached_key(|e| (!e.is_active(), e.name.to_lowercase()));
        roster
    }

    pub fn active_employees(&self) -> Vec<&Employee> {
        self.state.employees.iter().filter(|e| e.is_active()).collect()
    }

    pub fn entry(&self, id: &EntryId) -> Option<&TimeEntry> {
        self.state.entries.iter().find(|e| &e.id == id)
    }

    /// The open session for an employee, if any.
    pub fn active_session(&self, employee_id: &EmployeeId) -> Option<&ClockSession> {
        self.state
            .sessions
            .iter()
            .find(|s| &s.employee_id == employee_id)
    }

    pub fn session_elapsed_minutes(&self, session: &ClockSession) -> i64 {
        session.elapsed_minutes(self.now())
    }

    /// Entries inside the selected range.
    pub fn entries_for_range(&self) -> Vec<&TimeEntry> {
        self.entries_in(self.range)
    }

    pub fn entries_in(&self, range: TimeRange) -> Vec<&TimeEntry> {
        entries_in_range(&self.state.entries, range, &self.clock.now())
    }

    /// Metrics for the selected range.
    pub fn metrics(&self) -> DashboardMetrics {
        self.metrics_for(self.range)
    }

    pub fn metrics_for(&self, range: TimeRange) -> DashboardMetrics {
        DashboardMetrics::compute(
            &self.state.employees,
            &self.entries_in(range),
            self.state.sessions.len(),
        )
    }

    // ========== Mutations ==========

    pub fn set_range(&mut self, range: TimeRange) {
        self.range = range;
    }

    /// Appends a new employee and returns its fresh ID.
    ///
    /// A NaN, infinite or negative rate is stored as 0.
    pub fn add_employee(&mut self, mut employee: NewEmployee) -> EmployeeId {
        if !is_valid_rate(employee.hourly_rate) {
            tracing::warn!(rate = employee.hourly_rate, "unusable hourly rate, storing 0");
            employee.hourly_rate = 0.0;
        }
        let id = EmployeeId::generate();
        self.state
            .employees
            .push(employee.into_employee(id.clone()));
        tracing::debug!(employee_id = %id, "employee added");
        self.persist();
        id
    }

    pub fn update_employee(&mut self, id: &EmployeeId, update: EmployeeUpdate) -> Outcome {
        let bad_rate = update.hourly_rate.is_some_and(|rate| !is_valid_rate(rate));
        let outcome = match self.state.employees.iter_mut().find(|e| &e.id == id) {
            None => Outcome::Ignored(Rejection::UnknownEmployee(id.clone())),
            Some(_) if bad_rate => Outcome::Ignored(Rejection::InvalidRate(id.clone())),
            Some(employee) => {
                update.apply_to(employee);
                Outcome::Applied(())
            }
        };
        self.finish("update_employee", outcome)
    }

    /// Marks the employee inactive. Open sessions are left running.
    pub fn archive_employee(&mut self, id: &EmployeeId) -> Outcome {
        let update = EmployeeUpdate {
            status: Some(EmployeeStatus::Inactive),
            ..EmployeeUpdate::default()
        };
        self.update_employee(id, update)
    }

    /// Opens a session at the current time.
    ///
    /// The employee ID is not checked against the roster, and inactive
    /// employees may clock in.
    pub fn clock_in(
        &mut self,
        employee_id: EmployeeId,
        project: impl Into<String>,
        notes: Option<String>,
    ) -> Outcome<SessionId> {
        let outcome = if let Some(open) = self.active_session(&employee_id) {
            Outcome::Ignored(Rejection::SessionAlreadyOpen {
                session_id: open.id.clone(),
                employee_id,
            })
        } else {
            let session = ClockSession {
                id: SessionId::generate(),
                employee_id,
                project: project.into(),
                clock_in: self.now(),
                notes,
            };
            let id = session.id.clone();
            self.state.sessions.push(session);
            Outcome::Applied(id)
        };
        self.finish("clock_in", outcome)
    }

    /// Closes the employee's session into a clock entry at the front of the list.
    pub fn clock_out(&mut self, employee_id: &EmployeeId) -> Outcome<EntryId> {
        let position = self
            .state
            .sessions
            .iter()
            .position(|s| &s.employee_id == employee_id);
        let outcome = match position {
            Some(index) => {
                let now = self.now();
                let session = self.state.sessions.remove(index);
                let entry = session.into_entry(EntryId::generate(), now);
                let id = entry.id.clone();
                self.state.entries.insert(0, entry);
                Outcome::Applied(id)
            }
            None => Outcome::Ignored(Rejection::NoOpenSession(employee_id.clone())),
        };
        self.finish("clock_out", outcome)
    }

    /// Discards a session without recording any time.
    pub fn cancel_session(&mut self, session_id: &SessionId) -> Outcome {
        let before = self.state.sessions.len();
        self.state.sessions.retain(|s| &s.id != session_id);
        let outcome = if self.state.sessions.len() < before {
            Outcome::Applied(())
        } else {
            Outcome::Ignored(Rejection::UnknownSession(session_id.clone()))
        };
        self.finish("cancel_session", outcome)
    }

    /// Records a manual entry at the front of the list, unless it rounds to
    /// zero minutes or ends before it starts.
    pub fn add_manual_entry(&mut self, entry: ManualEntry) -> Outcome<EntryId> {
        let duration_minutes = minutes_between(entry.start, entry.end);
        let outcome = if duration_minutes <= 0 {
            Outcome::Ignored(Rejection::EmptyInterval {
                start: entry.start,
                end: entry.end,
                minutes: duration_minutes,
            })
        } else {
            let entry = TimeEntry {
                id: EntryId::generate(),
                employee_id: entry.employee_id,
                project: entry.project,
                start: entry.start,
                end: entry.end,
                duration_minutes,
                notes: entry.notes,
                entry_type: EntryType::Manual,
            };
            let id = entry.id.clone();
            self.state.entries.insert(0, entry);
            Outcome::Applied(id)
        };
        self.finish("add_manual_entry", outcome)
    }

    pub fn delete_entry(&mut self, id: &EntryId) -> Outcome {
        let before = self.state.entries.len();
        self.state.entries.retain(|e| &e.id != id);
        let outcome = if self.state.entries.len() < before {
            Outcome::Applied(())
        } else {
            Outcome::Ignored(Rejection::UnknownEntry(id.clone()))
        };
        self.finish("delete_entry", outcome)
    }

    /// Merges `update` into the entry, recomputing the duration when the
    /// start or end moved.
    pub fn update_entry(&mut self, id: &EntryId, update: EntryUpdate) -> Outcome {
        let outcome = match self.state.entries.iter_mut().find(|e| &e.id == id) {
            Some(entry) => {
                update.apply_to(entry);
                Outcome::Applied(())
            }
            None => Outcome::Ignored(Rejection::UnknownEntry(id.clone())),
        };
        self.finish("update_entry", outcome)
    }

    /// Replaces everything with the seed dataset.
    pub fn reset_to_seed(&mut self) {
        self.state = seed::default_state(&self.clock.now());
        tracing::info!("state reset to seed data");
        self.persist();
    }

    // ========== Persistence ==========

    fn finish<T>(&mut self, operation: &'static str, outcome: Outcome<T>) -> Outcome<T> {
        match &outcome {
            Outcome::Applied(_) => self.persist(),
            Outcome::Ignored(reason) => {
                tracing::debug!(operation, %reason, "mutation ignored");
            }
        }
        outcome
    }

    fn persist(&mut self) {
        let json = match self.state.to_json() {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize state");
                return;
            }
        };
        if let Err(err) = self.storage.set(STORAGE_KEY, &json) {
            tracing::warn!(error = %err, "failed to persist state");
        }
    }
}
