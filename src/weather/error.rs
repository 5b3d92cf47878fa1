//! Weather lookup error types

use thiserror::Error;

/// Any failure of the weather collaborator.
///
/// The record store treats every variant the same way: enrichment failed and
/// the create is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// No API key configured
    #[error("weather lookup is not configured")]
    NotConfigured,

    /// Connection failure or timeout
    #[error("network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success status
    #[error("weather service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not the expected JSON shape
    #[error("failed to parse weather response: {0}")]
    Parse(String),

    /// Body parsed but carried no description
    #[error("weather response has no description")]
    MissingDescription,
}

/// Result type for weather lookups
pub type WeatherResult<T> = Result<T, WeatherError>;
