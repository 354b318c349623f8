//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pt_core::{EmployeeId, EmployeeStatus, EntryId, EntryType, SessionId, TimeRange};

use crate::commands::util::parse_rate;

/// Employee time tracking.
///
/// Keeps a small roster, clock sessions and time entries, and reports hours
/// and labor cost per range.
#[derive(Debug, Parser)]
#[command(name = "pt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show storage location, roster counts and open sessions.
    Status,

    /// Show hours, head counts and labor cost for a range.
    Metrics {
        /// Range to report (today, week, month, all).
        #[arg(long)]
        range: Option<TimeRange>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Manage the employee roster.
    #[command(subcommand)]
    Employees(EmployeesAction),

    /// Clock employees in and out.
    #[command(subcommand)]
    Clock(ClockAction),

    /// List and edit time entries.
    #[command(subcommand)]
    Entries(EntriesAction),

    /// Replace all stored data with the built-in sample data.
    Reset,
}

/// Roster subcommands.
#[derive(Debug, Subcommand)]
pub enum EmployeesAction {
    /// List employees, active first.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add an employee.
    Add {
        /// Full name.
        name: String,

        #[arg(long, default_value = "Employee")]
        role: String,

        #[arg(long, default_value = "")]
        email: String,

        /// Hourly rate.
        #[arg(long, default_value_t = 18.0, value_parser = parse_rate)]
        rate: f64,
    },

    /// Change an employee's details.
    Update {
        id: EmployeeId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, value_parser = parse_rate)]
        rate: Option<f64>,

        /// active or inactive.
        #[arg(long)]
        status: Option<EmployeeStatus>,
    },

    /// Mark an employee inactive. Open sessions keep running.
    Archive { id: EmployeeId },
}

/// Clock subcommands.
#[derive(Debug, Subcommand)]
pub enum ClockAction {
    /// Start a session for an employee.
    In {
        employee: EmployeeId,

        /// Project name (defaults to "General").
        #[arg(long)]
        project: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Close the employee's session into a time entry.
    Out { employee: EmployeeId },

    /// Discard a session without recording time.
    Cancel { session: SessionId },

    /// List open sessions.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Entry subcommands.
#[derive(Debug, Subcommand)]
pub enum EntriesAction {
    /// List entries in a range, newest first.
    List {
        /// Range to list (today, week, month, all).
        #[arg(long)]
        range: Option<TimeRange>,

        /// Only entries for this employee.
        #[arg(long)]
        employee: Option<EmployeeId>,

        /// Only entries of this type (clock or manual).
        #[arg(long = "type")]
        entry_type: Option<EntryType>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Record a manual entry.
    ///
    /// Times accept ISO 8601, local "YYYY-MM-DD HH:MM" or "N hours ago".
    Add {
        #[arg(long)]
        employee: EmployeeId,

        #[arg(long)]
        start: String,

        #[arg(long)]
        end: String,

        /// Project name (defaults to "General").
        #[arg(long)]
        project: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Edit an entry. Changing start or end recomputes the duration.
    Update {
        id: EntryId,

        #[arg(long)]
        project: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        /// New notes; an empty string clears them.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an entry.
    Delete { id: EntryId },
}
