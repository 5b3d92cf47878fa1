//! Application configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so an absent
//! file or a partial file is fine. Command-line flags override file values.
//!
//! ```json
//! {
//!   "server": { "host": "0.0.0.0", "port": 3000, "cors_origins": [] },
//!   "weather": { "api_key": "...", "timeout_secs": 5 },
//!   "log": { "format": "json" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::LogConfig;
use crate::weather::WeatherConfig;

use super::errors::{CliError, CliResult};

/// Placeholder printed instead of secrets
const REDACTED: &str = "<redacted>";

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Values from the command line that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub weather_api_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides, then re-validate
    pub fn with_overrides(mut self, overrides: Overrides) -> CliResult<Self> {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(key) = overrides.weather_api_key {
            self.weather.api_key = Some(key);
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }

        let invalid = self.server.invalid_cors_origins();
        if !invalid.is_empty() {
            return Err(CliError::config_error(format!(
                "server.cors_origins has invalid entries (expected http(s)://host[:port]): {}",
                invalid.join(", ")
            )));
        }

        if self.weather.timeout_secs == 0 {
            return Err(CliError::config_error("weather.timeout_secs must be > 0"));
        }

        if self.weather.base_url.trim().is_empty() {
            return Err(CliError::config_error("weather.base_url must not be empty"));
        }

        Ok(())
    }

    /// Copy safe to print: the API key is replaced
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.weather.api_key.is_some() {
            copy.weather.api_key = Some(REDACTED.to_string());
        }
        copy
    }
}
