//! Clock-in/out commands.

use std::io::Write;

use anyhow::Result;
use pt_core::{Clock, ClockSession, KeyValueStore, Outcome, TimeTrackingStore};
use serde::Serialize;

use super::util::{format_duration, format_local, non_blank_or, report_outcome};
use crate::cli::ClockAction;

/// Project used when none is given.
pub const DEFAULT_PROJECT: &str = "General";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView<'a> {
    #[serde(flatten)]
    session: &'a ClockSession,
    employee_name: &'a str,
    elapsed_minutes: i64,
}

pub fn run<W, S, C>(
    writer: &mut W,
    store: &mut TimeTrackingStore<S, C>,
    action: &ClockAction,
) -> Result<()>
where
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    match action {
        ClockAction::In {
            employee,
            project,
            notes,
        } => {
            let project = non_blank_or(project.as_deref(), DEFAULT_PROJECT);
            let notes = notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string);
            let outcome = store.clock_in(employee.clone(), project.clone(), notes);
            let name = store.employee_name(employee).to_string();
            report_outcome(writer, outcome, |session| {
                format!("Clocked in {name} on {project} (session {session})")
            })
        }
        ClockAction::Out { employee } => match store.clock_out(employee) {
            Outcome::Applied(entry_id) => {
                let minutes = store.entry(&entry_id).map_or(0, |e| e.duration_minutes);
                writeln!(
                    writer,
                    "Clocked out {}: {} recorded (entry {entry_id})",
                    store.employee_name(employee),
                    format_duration(minutes)
                )?;
                Ok(())
            }
            ignored @ Outcome::Ignored(_) => report_outcome(writer, ignored, |_| String::new()),
        },
        ClockAction::Cancel { session } => {
            let outcome = store.cancel_session(session);
            report_outcome(writer, outcome, |()| format!("Cancelled session {session}"))
        }
        ClockAction::List { json } => list(writer, store, *json),
    }
}

fn list<W, S, C>(writer: &mut W, store: &TimeTrackingStore<S, C>, json: bool) -> Result<()>
where
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    let views: Vec<_> = store
        .sessions()
        .iter()
        .map(|session| SessionView {
            session,
            employee_name: store.employee_name(&session.employee_id),
            elapsed_minutes: store.session_elapsed_minutes(session),
        })
        .collect();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&views)?)?;
        return Ok(());
    }

    if views.is_empty() {
        writeln!(writer, "No open sessions.")?;
        return Ok(());
    }

    let tz = store.clock().now().timezone();
    writeln!(
        writer,
        "{:<38} {:<20} {:<14} {:<16} ELAPSED",
        "SESSION", "EMPLOYEE", "PROJECT", "SINCE"
    )?;
    for view in views {
        writeln!(
            writer,
            "{:<38} {:<20} {:<14} {:<16} {}",
            view.session.id.as_str(),
            view.employee_name,
            view.session.project,
            format_local(view.session.clock_in, &tz),
            format_duration(view.elapsed_minutes)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pt_core::{EmployeeId, EntryType};

    use super::*;
    use crate::commands::fixtures::{render, seeded_store};

    fn clock_in(employee: &str, project: Option<&str>) -> ClockAction {
        ClockAction::In {
            employee: EmployeeId::new(employee).unwrap(),
            project: project.map(str::to_string),
            notes: None,
        }
    }

    #[test]
    fn clock_in_then_out_records_entry() {
        let (mut store, clock) = seeded_store();
        let output = render(|w| run(w, &mut store, &clock_in("emp-2", Some("Maintenance"))));
        assert!(output.starts_with("Clocked in Marc Tremblay on Maintenance (session "));

        clock.advance(Duration::minutes(75));
        let out = ClockAction::Out {
            employee: EmployeeId::new("emp-2").unwrap(),
        };
        let output = render(|w| run(w, &mut store, &out));
        assert!(output.starts_with("Clocked out Marc Tremblay: 1h 15m recorded (entry "));

        assert!(store.sessions().is_empty());
        assert_eq!(store.entries()[0].entry_type, EntryType::Clock);
        assert_eq!(store.entries()[0].duration_minutes, 75);
    }

    #[test]
    fn blank_project_defaults_to_general() {
        let (mut store, _) = seeded_store();
        render(|w| run(w, &mut store, &clock_in("emp-1", Some("  "))));
        assert_eq!(store.sessions()[0].project, DEFAULT_PROJECT);
    }

    #[test]
    fn second_clock_in_is_reported() {
        let (mut store, _) = seeded_store();
        render(|w| run(w, &mut store, &clock_in("emp-1", None)));
        let output = render(|w| run(w, &mut store, &clock_in("emp-1", None)));

        assert!(output.starts_with("Ignored: employee emp-1 is already clocked in (session "));
        assert_eq!(store.sessions().len(), 1);
    }

    #[test]
    fn clock_out_without_session_is_reported() {
        let (mut store, _) = seeded_store();
        let out = ClockAction::Out {
            employee: EmployeeId::new("emp-1").unwrap(),
        };
        let output = render(|w| run(w, &mut store, &out));
        assert_eq!(output, "Ignored: employee emp-1 has no open session\n");
        assert_eq!(store.entries().len(), 3);
    }

    #[test]
    fn cancel_discards_session() {
        let (mut store, _) = seeded_store();
        render(|w| run(w, &mut store, &clock_in("emp-1", None)));
        let session = store.sessions()[0].id.clone();

        let output = render(|w| run(w, &mut store, &ClockAction::Cancel { session: session.clone() }));
        assert_eq!(output, format!("Cancelled session {session}\n"));
        assert!(store.sessions().is_empty());
        assert_eq!(store.entries().len(), 3);
    }

    #[test]
    fn list_shows_elapsed_time() {
        let (mut store, clock) = seeded_store();
        assert_eq!(
            render(|w| run(w, &mut store, &ClockAction::List { json: false })),
            "No open sessions.\n"
        );

        render(|w| run(w, &mut store, &clock_in("emp-1", Some("Accueil"))));
        clock.advance(Duration::minutes(20));

        let output = render(|w| run(w, &mut store, &ClockAction::List { json: false }));
        let row = output.lines().nth(1).unwrap();
        assert!(row.contains("Sophie Dubois"));
        assert!(row.contains("2025-03-12 10:00"));
        assert!(row.ends_with("20m"));

        let output = render(|w| run(w, &mut store, &ClockAction::List { json: true }));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["employeeName"], "Sophie Dubois");
        assert_eq!(value[0]["elapsedMinutes"], 20);
        assert_eq!(value[0]["project"], "Accueil");
    }
}
