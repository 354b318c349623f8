//! CLI subcommand implementations.

pub mod clock;
pub mod employees;
pub mod entries;
pub mod metrics;
pub mod reset;
pub mod status;
pub mod util;
