//! CLI module for travel-records
//!
//! Provides command-line interface for:
//! - serve: Load configuration, start logging and the HTTP server
//! - config: Print the effective configuration

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{print_config, run, run_command, serve};
pub use config::{AppConfig, Overrides};
pub use errors::{CliError, CliErrorCode, CliResult};
