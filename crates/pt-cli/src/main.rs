use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use pt_cli::commands::{clock, employees, entries, metrics, reset, status};
use pt_cli::{Cli, Commands, Config};
use pt_core::{SystemClock, TimeTrackingStore};
use pt_db::Database;

type Store = TimeTrackingStore<Database, SystemClock>;

/// Load config and open the store, ensuring the database directory exists.
fn open_store(config_path: Option<&Path>) -> Result<(Store, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    let mut store = TimeTrackingStore::open(db, SystemClock);
    store.set_range(config.default_range);
    Ok((store, config))
}

/// Logs go to stderr; stdout carries tables and `--json` output only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (mut store, config) = open_store(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Status => status::run(&mut stdout, &store, &config.database_path)?,
        Commands::Metrics { range, json } => metrics::run(&mut stdout, &mut store, *range, *json)?,
        Commands::Employees(action) => employees::run(&mut stdout, &mut store, action)?,
        Commands::Clock(action) => clock::run(&mut stdout, &mut store, action)?,
        Commands::Entries(action) => entries::run(&mut stdout, &mut store, action)?,
        Commands::Reset => reset::run(&mut stdout, &mut store)?,
    }

    Ok(())
}
