//! Pointage CLI library.
//!
//! This crate provides the `pt` command-line front end over the time-tracking store.

mod cli;
pub mod commands;
mod config;

pub use cli::{ClockAction, Cli, Commands, EmployeesAction, EntriesAction};
pub use config::Config;
