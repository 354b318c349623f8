//! Time entry commands.

use std::io::Write;

use anyhow::Result;
use pt_core::{
    Clock, EntryFilter, EntryUpdate, KeyValueStore, ManualEntry, TimeEntry, TimeTrackingStore,
};
use serde::Serialize;

use super::clock::DEFAULT_PROJECT;
use super::util::{format_duration, format_local, non_blank_or, parse_datetime, report_outcome};
use crate::cli::EntriesAction;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryView<'a> {
    #[serde(flatten)]
    entry: &'a TimeEntry,
    employee_name: &'a str,
}

pub fn run<W, S, C>(
    writer: &mut W,
    store: &mut TimeTrackingStore<S, C>,
    action: &EntriesAction,
) -> Result<()>
where
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    let now = store.now();
    let tz = store.clock().now().timezone();

    match action {
        EntriesAction::List {
            range,
            employee,
            entry_type,
            json,
        } => {
            if let Some(range) = range {
                store.set_range(*range);
            }
            let filter = EntryFilter {
                employee_id: employee.clone(),
                entry_type: *entry_type,
            };
            list(writer, store, &filter, *json)
        }
        EntriesAction::Add {
            employee,
            start,
            end,
            project,
            notes,
        } => {
            let entry = ManualEntry {
                employee_id: employee.clone(),
                project: non_blank_or(project.as_deref(), DEFAULT_PROJECT),
                start: parse_datetime(start, now, &tz)?,
                end: parse_datetime(end, now, &tz)?,
                notes: notes.clone().filter(|n| !n.trim().is_empty()),
            };
            let outcome = store.add_manual_entry(entry);
            let name = store.employee_name(employee).to_string();
            report_outcome(writer, outcome, |id| {
                format!("Recorded manual entry {id} for {name}")
            })
        }
        EntriesAction::Update {
            id,
            project,
            start,
            end,
            notes,
        } => {
            let update = EntryUpdate {
                project: project.clone(),
                start: start
                    .as_deref()
                    .map(|s| parse_datetime(s, now, &tz))
                    .transpose()?,
                end: end
                    .as_deref()
                    .map(|s| parse_datetime(s, now, &tz))
                    .transpose()?,
                notes: notes
                    .as_ref()
                    .map(|n| Some(n.clone()).filter(|n| !n.trim().is_empty())),
                ..EntryUpdate::default()
            };
            if update == EntryUpdate::default() {
                anyhow::bail!("nothing to update; pass at least one of --project, --start, --end, --notes");
            }
            let outcome = store.update_entry(id, update);
            report_outcome(writer, outcome, |()| format!("Updated entry {id}"))
        }
        EntriesAction::Delete { id } => {
            let outcome = store.delete_entry(id);
            report_outcome(writer, outcome, |()| format!("Deleted entry {id}"))
        }
    }
}

fn list<W, S, C>(
    writer: &mut W,
    store: &TimeTrackingStore<S, C>,
    filter: &EntryFilter,
    json: bool,
) -> Result<()>
where
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    let entries = filter.apply(store.entries_for_range());

    if json {
        let views: Vec<_> = entries
            .iter()
            .map(|entry| EntryView {
                entry,
                employee_name: store.employee_name(&entry.employee_id),
            })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&views)?)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(writer, "No entries for {}.", store.range())?;
        return Ok(());
    }

    let tz = store.clock().now().timezone();
    writeln!(
        writer,
        "{:<16} {:<5} {:>8} {:<18} {:<14} {:<6} ID",
        "START", "END", "DURATION", "EMPLOYEE", "PROJECT", "TYPE"
    )?;
    for entry in &entries {
        let end = format_local(entry.end, &tz);
        writeln!(
            writer,
            "{:<16} {:<5} {:>8} {:<18} {:<14} {:<6} {}",
            format_local(entry.start, &tz),
            end.get(11..).unwrap_or(&end),
            format_duration(entry.duration_minutes),
            store.employee_name(&entry.employee_id),
            entry.project,
            entry.entry_type.as_str(),
            entry.id
        )?;
    }

    let total: i64 = entries.iter().map(|e| e.duration_minutes).sum();
    writeln!(writer, "{} entries, {}", entries.len(), format_duration(total))?;
    Ok(())
}
