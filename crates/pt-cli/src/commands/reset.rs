//! Reset command: back to the built-in sample data.

use std::io::Write;

use anyhow::Result;
use pt_core::{Clock, KeyValueStore, TimeTrackingStore};

pub fn run<W, S, C>(writer: &mut W, store: &mut TimeTrackingStore<S, C>) -> Result<()>
where
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    store.reset_to_seed();
    writeln!(
        writer,
        "Reset to sample data: {} employees, {} entries.",
        store.employees().len(),
        store.entries().len()
    )?;
    Ok(())
}
