//! Roster members and their partial updates.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{EmployeeId, EmployeeStatus};

/// A person on the roster.
///
/// Employees are never hard-deleted; archiving flips `status` to inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: String,
    pub email: String,
    /// Cost per hour, used for labor cost metrics.
    #[serde(default, deserialize_with = "rate_or_zero")]
    pub hourly_rate: f64,
    pub status: EmployeeStatus,
}

/// Whether `rate` survives a JSON round trip: finite and not negative.
pub fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate >= 0.0
}

/// JSON has no NaN or infinity; serde_json writes them as `null`. Read those,
/// and any other unusable rate, as 0 rather than rejecting the whole state.
fn rate_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let rate = Option::<f64>::deserialize(deserializer)?;
    Ok(rate.filter(|r| is_valid_rate(*r)).unwrap_or(0.0))
}

impl Employee {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Fields for a new employee. The store assigns the ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
    pub email: String,
    pub hourly_rate: f64,
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl NewEmployee {
    pub(crate) fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            role: self.role,
            email: self.email,
            hourly_rate: self.hourly_rate,
            status: self.status,
        }
    }
}

/// A partial update to an employee. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub hourly_rate: Option<f64>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeUpdate {
    /// Returns true if the update would not change any field.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.email.is_none()
            && self.hourly_rate.is_none()
            && self.status.is_none()
    }

    pub(crate) fn apply_to(self, employee: &mut Employee) {
        if let Some(name) = self.name {
            employee.name = name;
        }
        if let Some(role) = self.role {
            employee.role = role;
        }
        if let Some(email) = self.email {
            employee.email = email;
        }
        if let Some(rate) = self.hourly_rate {
            employee.hourly_rate = rate;
        }
        if let Some(status) = self.status {
            employee.status = status;
        }
    }
}
