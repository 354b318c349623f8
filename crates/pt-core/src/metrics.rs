//! Dashboard metrics derived from roster, entries and sessions.

use std::collections::HashMap;

use serde::Serialize;

use crate::employee::Employee;
use crate::entry::TimeEntry;
use crate::types::EmployeeId;

/// Aggregate figures for the selected range.
///
/// Only `total_hours`, `average_hours_per_employee` and `labor_cost` depend on
/// the range; the head counts reflect the current roster and open sessions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_hours: f64,
    /// Active employees on the roster.
    pub total_employees: usize,
    pub active_sessions: usize,
    pub average_hours_per_employee: f64,
    pub labor_cost: f64,
}

impl DashboardMetrics {
    /// Computes metrics over already range-filtered entries.
    #[expect(
        clippy::cast_precision_loss,
        reason = "roster sizes and minute totals are small"
    )]
    pub fn compute(
        employees: &[Employee],
        entries: &[&TimeEntry],
        active_sessions: usize,
    ) -> Self {
        let total_minutes: i64 = entries.iter().map(|entry| entry.duration_minutes).sum();
        let total_hours = total_minutes as f64 / 60.0;

        let total_employees = employees.iter().filter(|e| e.is_active()).count();
        let average_hours_per_employee = if total_employees > 0 {
            total_hours / total_employees as f64
        } else {
            0.0
        };

        // First employee wins if an ID is duplicated.
        let mut rates: HashMap<&EmployeeId, f64> = HashMap::with_capacity(employees.len());
        for employee in employees {
            rates.entry(&employee.id).or_insert(employee.hourly_rate);
        }
        let labor_cost = entries
            .iter()
            .filter_map(|entry| rates.get(&entry.employee_id).map(|rate| entry.hours() * rate))
            .sum();

        Self {
            total_hours,
            total_employees,
            active_sessions,
            average_hours_per_employee,
            labor_cost,
        }
    }
}
