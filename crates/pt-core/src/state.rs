//! The persisted aggregate and its JSON encoding.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::employee::Employee;
use crate::entry::TimeEntry;
use crate::seed;
use crate::session::ClockSession;
use crate::storage::KeyValueStore;

/// Fixed storage key for the serialized state.
pub const STORAGE_KEY: &str = "pointage-state-v1";

/// Everything the store persists: roster, entries and open sessions.
///
/// New entries are kept at the front; employees and sessions in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackingState {
    pub employees: Vec<Employee>,
    pub entries: Vec<TimeEntry>,
    pub sessions: Vec<ClockSession>,
}

/// Lenient shape for reading: any top-level list may be missing or null.
#[derive(Debug, Deserialize)]
struct PersistedState {
    employees: Option<Vec<Employee>>,
    entries: Option<Vec<TimeEntry>>,
    sessions: Option<Vec<ClockSession>>,
}

impl TrackingState {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses persisted JSON. Missing employees or entries fall back to the
    /// corresponding `seed` lists; missing sessions to none.
    pub fn from_json(raw: &str, seed: Self) -> Result<Self, serde_json::Error> {
        let persisted: PersistedState = serde_json::from_str(raw)?;
        Ok(Self {
            employees: persisted.employees.unwrap_or(seed.employees),
            entries: persisted.entries.unwrap_or(seed.entries),
            sessions: persisted.sessions.unwrap_or_default(),
        })
    }
}

/// Reads the state from `storage`, substituting the seed dataset when it is
/// absent, unreadable or malformed.
pub fn load_state<S, Tz>(storage: &S, now: &DateTime<Tz>) -> TrackingState
where
    S: KeyValueStore,
    Tz: TimeZone,
{
    let seed = seed::default_state(now);
    let raw = match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("no stored state, starting from seed data");
            return seed;
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to read stored state, starting from seed data");
            return seed;
        }
    };

    match TrackingState::from_json(&raw, seed.clone()) {
        Ok(state) => {
            tracing::debug!(
                employees = state.employees.len(),
                entries = state.entries.len(),
                sessions = state.sessions.len(),
                "loaded stored state"
            );
            state
        }
        Err(err) => {
            tracing::warn!(error = %err, "discarding malformed stored state");
            seed
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset};

    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::{EmployeeId, EntryId, EntryType, SessionId};

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 12, 15, 0, 0)
            .unwrap()
    }

    fn sample_state() -> TrackingState {
        let mut state = seed::default_state(&now());
        let start = now().with_timezone(&chrono::Utc) - Duration::hours(2);
        state.sessions.push(ClockSession {
            id: SessionId::new("ses-1").unwrap(),
            employee_id: EmployeeId::new("emp-2").unwrap(),
            project: "Maintenance".to_string(),
            clock_in: start,
            notes: None,
        });
        state.entries.insert(
            0,
            TimeEntry {
                id: EntryId::new("ent-9").unwrap(),
                employee_id: EmployeeId::new("emp-1").unwrap(),
                project: "Accueil".to_string(),
                start,
                end: start + Duration::minutes(30),
                duration_minutes: 30,
                notes: Some("Déjeuner client".to_string()),
                entry_type: EntryType::Manual,
            },
        );
        state
    }

    #[test]
    fn json_round_trip_reproduces_state() {
        let state = sample_state();
        let json = state.to_json().unwrap();
        let reloaded = TrackingState::from_json(&json, TrackingState::default()).unwrap();
        assert_eq!(reloaded, state);
    }

    #[test]
    fn missing_key_loads_seed() {
        let storage = MemoryStore::new();
        let state = load_state(&storage, &now());
        assert_eq!(state, seed::default_state(&now()));
        assert_eq!(state.employees.len(), 3);
        assert_eq!(state.entries.len(), 3);
        assert!(state.sessions.is_empty());
    }

    #[test]
    fn malformed_value_loads_seed() {
        let storage = MemoryStore::with_value(STORAGE_KEY, "{not json");
        assert_eq!(load_state(&storage, &now()), seed::default_state(&now()));
    }

    #[test]
    fn invalid_field_loads_seed() {
        let storage = MemoryStore::with_value(
            STORAGE_KEY,
            r#"{"employees":[{"id":"","name":"x","role":"","email":"","hourlyRate":1,"status":"active"}]}"#,
        );
        assert_eq!(load_state(&storage, &now()), seed::default_state(&now()));
    }

    #[test]
    fn missing_lists_fall_back_individually() {
        let storage = MemoryStore::with_value(STORAGE_KEY, r#"{"entries":[],"sessions":null}"#);
        let state = load_state(&storage, &now());
        assert_eq!(state.employees, seed::default_state(&now()).employees);
        assert!(state.entries.is_empty());
        assert!(state.sessions.is_empty());
    }

    #[test]
    fn null_rate_keeps_the_rest_of_the_state() {
        let mut state = sample_state();
        state.employees[0].hourly_rate = 0.0;
        let json = state.to_json().unwrap().replacen(r#""hourlyRate":0.0"#, r#""hourlyRate":null"#, 1);
        assert!(json.contains("null"));

        let storage = MemoryStore::with_value(STORAGE_KEY, json);
        assert_eq!(load_state(&storage, &now()), state);
    }

    #[test]
    fn stored_state_is_loaded() {
        let state = sample_state();
        let storage = MemoryStore::with_value(STORAGE_KEY, state.to_json().unwrap());
        assert_eq!(load_state(&storage, &now()), state);
    }

    #[test]
    fn top_level_keys_match_persistence_format() {
        let json: serde_json::Value = serde_json::from_str(&sample_state().to_json().unwrap()).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["employees", "entries", "sessions"]);
    }
}
