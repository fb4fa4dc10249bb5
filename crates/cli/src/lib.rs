//! `purific` command-line front end.
//!
//! Wires configuration, storage and logging around the catalog editor and
//! the savings simulator.

pub mod commands;
pub mod config;

pub use commands::{Cli, run};
pub use config::AppConfig;
