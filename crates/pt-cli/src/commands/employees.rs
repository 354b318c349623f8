//! Roster commands.

use std::io::Write;

use anyhow::Result;
use pt_core::{
    Clock, EmployeeStatus, EmployeeUpdate, KeyValueStore, NewEmployee, TimeTrackingStore,
};

use super::util::{format_money, report_outcome};
use crate::cli::EmployeesAction;

pub fn run<W, S, C>(
    writer: &mut W,
    store: &mut TimeTrackingStore<S, C>,
    action: &EmployeesAction,
) -> Result<()>
where
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    match action {
        EmployeesAction::List { json } => list(writer, store, *json),
        EmployeesAction::Add {
            name,
            role,
            email,
            rate,
        } => {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("employee name cannot be empty");
            }
            let id = store.add_employee(NewEmployee {
                name: name.to_string(),
                role: role.trim().to_string(),
                email: email.trim().to_string(),
                hourly_rate: *rate,
                status: EmployeeStatus::Active,
            });
            writeln!(writer, "Added employee {name} ({id})")?;
            Ok(())
        }
        EmployeesAction::Update {
            id,
            name,
            role,
            email,
            rate,
            status,
        } => {
            let update = EmployeeUpdate {
                name: name.clone(),
                role: role.clone(),
                email: email.clone(),
                hourly_rate: *rate,
                status: *status,
            };
            if update.is_empty() {
                anyhow::bail!("nothing to update; pass at least one of --name, --role, --email, --rate, --status");
            }
            let outcome = store.update_employee(id, update);
            report_outcome(writer, outcome, |()| format!("Updated employee {id}"))
        }
        EmployeesAction::Archive { id } => {
            let outcome = store.archive_employee(id);
            report_outcome(writer, outcome, |()| format!("Archived employee {id}"))
        }
    }
}

fn list<W, S, C>(writer: &mut W, store: &TimeTrackingStore<S, C>, json: bool) -> Result<()>
where
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    let roster = store.roster();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&roster)?)?;
        return Ok(());
    }

    if roster.is_empty() {
        writeln!(writer, "No employees yet. Run 'pt employees add <name>' to add one.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<38} {:<20} {:<26} {:>8} {:<9} CLOCKED IN",
        "ID", "NAME", "ROLE", "RATE", "STATUS"
    )?;
    for employee in roster {
        let clocked_in = store
            .active_session(&employee.id)
            .map_or("-", |session| session.project.as_str());
        writeln!(
            writer,
            "{:<38} {:<20} {:<26} {:>8} {:<9} {}",
            employee.id.as_str(),
            employee.name,
            employee.role,
            format_money(employee.hourly_rate),
            employee.status.as_str(),
            clocked_in
        )?;
    }
    Ok(())
}
