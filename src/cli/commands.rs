//! CLI command implementations
//!
//! `serve` boots the runtime and blocks until shutdown; `config` prints the
//! effective configuration.

use std::path::Path;
use std::sync::Arc;

use crate::http_server::HttpServer;
use crate::observability;
use crate::records::RecordStore;
use crate::weather::{DisabledWeather, HttpWeatherClient, WeatherLookup};

use super::args::{Cli, Command};
use super::config::{AppConfig, Overrides};
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            host,
            port,
            weather_api_key,
        } => {
            let config = AppConfig::load_or_default(config.as_deref())?.with_overrides(Overrides {
                host,
                port,
                weather_api_key,
            })?;
            serve(config)
        }
        Command::Config { config } => print_config(config.as_deref()),
    }
}

/// Start the HTTP server with the given configuration
pub fn serve(config: AppConfig) -> CliResult<()> {
    observability::init_tracing(&config.log)
        .map_err(|e| CliError::logging_error(e.to_string()))?;

    let store = Arc::new(RecordStore::new(weather_lookup(&config)?));
    let server = HttpServer::with_config(config.server, store);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_error(format!("Failed to start runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::server_error(e.to_string()))
}

/// Picks the weather implementation the store enriches through
fn weather_lookup(config: &AppConfig) -> CliResult<Arc<dyn WeatherLookup>> {
    let client = HttpWeatherClient::from_config(&config.weather)
        .map_err(|e| CliError::config_error(format!("Failed to build weather client: {}", e)))?;

    match client {
        Some(client) => {
            tracing::info!(base_url = client.base_url(), "weather enrichment enabled");
            let lookup: Arc<dyn WeatherLookup> = Arc::new(client);
            Ok(lookup)
        }
        None => {
            tracing::warn!("no weather API key configured, enrichment requests will fail");
            let lookup: Arc<dyn WeatherLookup> = Arc::new(DisabledWeather);
            Ok(lookup)
        }
    }
}

/// Print the effective configuration, secrets redacted
pub fn print_config(path: Option<&Path>) -> CliResult<()> {
    let config = AppConfig::load_or_default(path)?;
    write_json(&config.redacted())
}
