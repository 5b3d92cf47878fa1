//! HTTP weather client
//!
//! Talks to an OpenWeatherMap-compatible "current weather" endpoint:
//!
//! ```text
//! GET {base_url}?q={destination},{country}&appid={api_key}&units=metric
//! ```
//!
//! Only `weather[0].description` is read from the response. Anything else in
//! the body is ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{WeatherError, WeatherResult};

/// Default current-weather endpoint
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Longest upstream error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// Weather client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Endpoint URL (default: OpenWeatherMap current weather)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; enrichment is disabled when absent
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds (default: 5)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_WEATHER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WeatherConfig {
    /// True when an API key is present
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    #[serde(default)]
    description: Option<String>,
}

/// Current weather client
pub struct HttpWeatherClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpWeatherClient {
    /// Create a client with the given endpoint, key and timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Create a client from configuration.
    ///
    /// Returns `Ok(None)` when no API key is configured.
    pub fn from_config(config: &WeatherConfig) -> Result<Option<Self>, reqwest::Error> {
        match config.api_key.as_deref() {
            Some(key) if !key.is_empty() => Self::new(
                config.base_url.clone(),
                key,
                Duration::from_secs(config.timeout_secs),
            )
            .map(Some),
            _ => Ok(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current weather description for a destination
    pub async fn current(&self, destination: &str, country: &str) -> WeatherResult<String> {
        let location = format!("{},{}", destination, country);

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[
                ("q", location.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        parse_description(&body)
    }
}

/// The request URL carries the API key, so it is stripped before formatting.
fn network_error(e: reqwest::Error) -> WeatherError {
    let e = e.without_url();
    if e.is_timeout() {
        WeatherError::Network(format!("request timed out: {}", e))
    } else {
        WeatherError::Network(e.to_string())
    }
}

/// Extracts `weather[0].description` from a response body.
fn parse_description(body: &str) -> WeatherResult<String> {
    let response: CurrentWeatherResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Parse(e.to_string()))?;

    response
        .weather
        .into_iter()
        .next()
        .and_then(|c| c.description)
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .ok_or(WeatherError::MissingDescription)
}
