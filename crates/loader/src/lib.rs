//! Command-line loader for the port fee reference dataset.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
