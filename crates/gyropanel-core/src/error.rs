//! Core error types for gyropanel-core.
//!
//! Nothing in the widget is fatal: engines report [`ValidationError`]s that
//! the widget renders as inline status text, and weather failures become a
//! [`WeatherError`] whose `Display` is the message shown on the panel.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gyropanel-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Weather lookup errors
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be prepared
    #[error("Config directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// User input rejected by an engine. The message is what the panel shows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Timer started with a total of zero seconds.
    #[error("⚠️ Please enter a valid time")]
    InvalidTimerDuration,

    /// Alarm set with no time entered.
    #[error("⚠️ Please select a time first")]
    EmptyAlarmTime,

    /// Alarm time that is not `HH:MM` within a day.
    #[error("⚠️ Invalid alarm time '{0}'")]
    InvalidAlarmTime(String),

    /// Keypad input that is not a single decimal digit.
    #[error("Invalid keypad digit '{0}'")]
    InvalidDigit(char),
}

/// Weather lookup failures. Each variant's `Display` is user-facing.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// No location source is available on this host.
    #[error("Geolocation not supported.")]
    GeolocationUnsupported,

    /// The user refused location access.
    #[error("Location permission denied")]
    PermissionDenied,

    /// Transport or HTTP status failure.
    #[error("Weather fetch failed")]
    Request(#[source] reqwest::Error),

    /// Response body was not JSON.
    #[error("Weather fetch failed")]
    Parse(#[source] serde_json::Error),

    /// JSON parsed but `current_weather` was absent or incomplete.
    #[error("Weather unavailable")]
    MissingCurrentWeather,

    /// Endpoint in the configuration is not a valid URL.
    #[error("Weather fetch failed")]
    InvalidEndpoint(#[source] url::ParseError),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Request(err)
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Parse(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
