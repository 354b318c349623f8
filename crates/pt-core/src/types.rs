//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Invalid employee status value.
    #[error("invalid employee status: {value}")]
    InvalidStatus { value: String },

    /// Invalid time entry type value.
    #[error("invalid entry type: {value}")]
    InvalidEntryType { value: String },

    /// Invalid time range value.
    #[error("invalid time range: {value} (expected today, week, month or all)")]
    InvalidRange { value: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Generates a fresh random (UUID v4) ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated employee identifier.
    ///
    /// Immutable once assigned. Seed employees use `emp-N`, new ones get a UUID.
    EmployeeId, "employee ID"
);

define_string_id!(
    /// A validated time entry identifier.
    EntryId, "entry ID"
);

define_string_id!(
    /// A validated clock session identifier.
    SessionId, "session ID"
);

/// Whether an employee is still on the active roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EmployeeStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// How a time entry came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Produced by clocking out of a session.
    Clock,
    /// Entered directly with explicit start and end.
    Manual,
}

impl EntryType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clock" => Ok(Self::Clock),
            "manual" => Ok(Self::Manual),
            _ => Err(ValidationError::InvalidEntryType {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_id_rejects_empty() {
        assert!(EmployeeId::new("").is_err());
        assert!(EmployeeId::new("emp-1").is_ok());
    }

    #[test]
    fn empty_id_error_names_the_field() {
        let err = EntryId::new("").unwrap_err();
        assert_eq!(err.to_string(), "entry ID cannot be empty");
    }

    #[test]
    fn employee_id_serde_roundtrip() {
        let id = EmployeeId::new("emp-1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"emp-1\"");
        let parsed: EmployeeId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn session_id_serde_rejects_empty() {
        let result: Result<SessionId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = EntryId::generate();
        let b = EntryId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn employee_status_from_str() {
        assert_eq!(
            "active".parse::<EmployeeStatus>().unwrap(),
            EmployeeStatus::Active
        );
        assert_eq!(
            "inactive".parse::<EmployeeStatus>().unwrap(),
            EmployeeStatus::Inactive
        );
        assert!("retired".parse::<EmployeeStatus>().is_err());
    }

    #[test]
    fn entry_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EntryType::Clock).unwrap(), "\"clock\"");
        assert_eq!(
            serde_json::to_string(&EntryType::Manual).unwrap(),
            "\"manual\""
        );
        let parsed: EntryType = serde_json::from_str("\"manual\"").unwrap();
        assert_eq!(parsed, EntryType::Manual);
    }

    #[test]
    fn entry_type_from_str_rejects_unknown() {
        let err = "auto".parse::<EntryType>().unwrap_err();
        assert_eq!(err.to_string(), "invalid entry type: auto");
    }
}
