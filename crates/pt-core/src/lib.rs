//! Core domain logic for the pointage time tracker.
//!
//! This crate contains:
//! - Roster, entry and session types with their JSON persistence format
//! - Range windows on the local calendar and dashboard metrics
//! - [`TimeTrackingStore`]: the single owner of all tracking state

pub mod clock;
pub mod employee;
pub mod entry;
pub mod metrics;
pub mod range;
mod seed;
pub mod session;
pub mod state;
pub mod storage;
pub mod store;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use employee::{Employee, EmployeeUpdate, NewEmployee, is_valid_rate};
pub use entry::{EntryFilter, EntryUpdate, ManualEntry, TimeEntry, minutes_between};
pub use metrics::DashboardMetrics;
pub use range::{RangeWindow, TimeRange};
pub use session::ClockSession;
pub use state::{STORAGE_KEY, TrackingState};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::{Outcome, Rejection, TimeTrackingStore, UNKNOWN_EMPLOYEE};
pub use types::{EmployeeId, EmployeeStatus, EntryId, EntryType, SessionId, ValidationError};
