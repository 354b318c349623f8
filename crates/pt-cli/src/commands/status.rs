//! Status command: where data lives and what is running.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use pt_core::{Clock, STORAGE_KEY, TimeTrackingStore};
use pt_db::Database;

use super::util::{format_duration, format_local};

pub fn run<W: Write, C: Clock>(
    writer: &mut W,
    store: &TimeTrackingStore<Database, C>,
    database_path: &Path,
) -> Result<()> {
    let last_saved = store.storage().updated_at(STORAGE_KEY)?;
    let active = store.active_employees().len();

    writeln!(writer, "Pointage status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(
        writer,
        "Last saved: {}",
        last_saved.as_deref().unwrap_or("never")
    )?;
    writeln!(
        writer,
        "Employees: {} ({active} active)",
        store.employees().len()
    )?;
    writeln!(writer, "Entries: {}", store.entries().len())?;

    if store.sessions().is_empty() {
        writeln!(writer, "No open sessions.")?;
        return Ok(());
    }

    let tz = store.clock().now().timezone();
    writeln!(writer, "Open sessions:")?;
    for session in store.sessions() {
        writeln!(
            writer,
            "- {} on {} since {} ({})",
            store.employee_name(&session.employee_id),
            session.project,
            format_local(session.clock_in, &tz),
            format_duration(store.session_elapsed_minutes(session))
        )?;
    }

    Ok(())
}
