//! Weather lookup collaborator
//!
//! The record store only sees the [`WeatherLookup`] trait. Production code
//! uses [`HttpWeatherClient`]; when no API key is configured the service runs
//! with [`DisabledWeather`]; tests substitute their own implementations.

mod client;
mod error;

use async_trait::async_trait;

pub use client::{HttpWeatherClient, WeatherConfig, DEFAULT_WEATHER_URL};
pub use error::{WeatherError, WeatherResult};

/// Fetches a short description of the current weather at a destination.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Returns a description such as "light rain".
    async fn fetch_weather(&self, destination: &str, country: &str) -> WeatherResult<String>;
}

/// Lookup used when enrichment is not configured. Always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledWeather;

#[async_trait]
impl WeatherLookup for DisabledWeather {
    async fn fetch_weather(&self, _destination: &str, _country: &str) -> WeatherResult<String> {
        Err(WeatherError::NotConfigured)
    }
}

#[async_trait]
impl WeatherLookup for HttpWeatherClient {
    async fn fetch_weather(&self, destination: &str, country: &str) -> WeatherResult<String> {
        self.current(destination, country).await
    }
}
