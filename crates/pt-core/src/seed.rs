//! Built-in dataset used when nothing usable is stored.

use chrono::{DateTime, Duration, NaiveTime, TimeZone};

use crate::employee::Employee;
use crate::entry::TimeEntry;
use crate::range::local_to_utc;
use crate::state::TrackingState;
use crate::types::{EmployeeId, EmployeeStatus, EntryId, EntryType};

struct SeedEmployee {
    id: &'static str,
    name: &'static str,
    role: &'static str,
    email: &'static str,
    hourly_rate: f64,
    status: EmployeeStatus,
}

const EMPLOYEES: [SeedEmployee; 3] = [
    SeedEmployee {
        id: "emp-1",
        name: "Sophie Dubois",
        role: "Administrative assistant",
        email: "sophie.dubois@example.com",
        hourly_rate: 18.0,
        status: EmployeeStatus::Active,
    },
    SeedEmployee {
        id: "emp-2",
        name: "Marc Tremblay",
        role: "Support technician",
        email: "marc.tremblay@example.com",
        hourly_rate: 22.0,
        status: EmployeeStatus::Active,
    },
    SeedEmployee {
        id: "emp-3",
        name: "Lina Ouedraogo",
        role: "Project manager",
        email: "lina.ouedraogo@example.com",
        hourly_rate: 30.0,
        status: EmployeeStatus::Inactive,
    },
];

struct SeedEntry {
    id: &'static str,
    employee_id: &'static str,
    project: &'static str,
    days_ago: i64,
    start: (u32, u32),
    end: (u32, u32),
    duration_minutes: i64,
    notes: Option<&'static str>,
    entry_type: EntryType,
}

const ENTRIES: [SeedEntry; 3] = [
    SeedEntry {
        id: "ent-1",
        employee_id: "emp-1",
        project: "Accueil",
        days_ago: 0,
        start: (8, 30),
        end: (12, 0),
        duration_minutes: 210,
        notes: Some("Réception des clients"),
        entry_type: EntryType::Clock,
    },
    SeedEntry {
        id: "ent-2",
        employee_id: "emp-2",
        project: "Maintenance",
        days_ago: 1,
        start: (9, 0),
        end: (17, 15),
        duration_minutes: 495,
        notes: Some("Interventions sur site"),
        entry_type: EntryType::Manual,
    },
    SeedEntry {
        id: "ent-3",
        employee_id: "emp-1",
        project: "Accueil",
        days_ago: 2,
        start: (8, 45),
        end: (16, 30),
        duration_minutes: 465,
        notes: None,
        entry_type: EntryType::Clock,
    },
];

fn seed_id<T: std::str::FromStr>(raw: &str) -> T {
    raw.parse()
        .unwrap_or_else(|_| unreachable!("seed ids are non-empty literals"))
}

/// Three employees (one inactive), three entries over the last three local
/// days, no open sessions.
pub fn default_state<Tz: TimeZone>(now: &DateTime<Tz>) -> TrackingState {
    let tz = now.timezone();
    let today = now.date_naive();
    let at = |days_ago: i64, (hour, minute): (u32, u32)| {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
        local_to_utc(&tz, (today - Duration::days(days_ago)).and_time(time))
    };

    let employees = EMPLOYEES
        .iter()
        .map(|e| Employee {
            id: seed_id::<EmployeeId>(e.id),
            name: e.name.to_string(),
            role: e.role.to_string(),
            email: e.email.to_string(),
            hourly_rate: e.hourly_rate,
            status: e.status,
        })
        .collect();

    let entries = ENTRIES
        .iter()
        .map(|e| TimeEntry {
            id: seed_id::<EntryId>(e.id),
            employee_id: seed_id::<EmployeeId>(e.employee_id),
            project: e.project.to_string(),
            start: at(e.days_ago, e.start),
            end: at(e.days_ago, e.end),
            duration_minutes: e.duration_minutes,
            notes: e.notes.map(str::to_string),
            entry_type: e.entry_type,
        })
        .collect();

    TrackingState {
        employees,
        entries,
        sessions: Vec::new(),
    }
}
