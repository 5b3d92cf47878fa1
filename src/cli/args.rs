//! CLI argument definitions using clap
//!
//! Commands:
//! - travel-records serve [--config <path>] [--host <host>] [--port <port>]
//! - travel-records config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Travel records - an in-memory travel log with weather enrichment
#[derive(Parser, Debug)]
#[command(name = "travel-records")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overrides the config file
        #[arg(long)]
        port: Option<u16>,

        /// Weather API key, overrides the config file
        #[arg(long, env = "TRAVEL_RECORDS_WEATHER_API_KEY", hide_env_values = true)]
        weather_api_key: Option<String>,
    },

    /// Print the effective configuration and exit
    Config {
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
