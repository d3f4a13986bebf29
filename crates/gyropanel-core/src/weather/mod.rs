//! Weather panel data.
//!
//! [`WeatherLookup`] tracks whether a successful fetch has happened and
//! decides when to ask for a new one; [`OpenMeteoClient`] performs the HTTP
//! round trip. The lookup never awaits anything itself: it hands out a
//! [`WeatherRequest`] and is told the outcome later.

mod client;
mod lookup;

pub use client::{CurrentWeather, OpenMeteoClient, DEFAULT_FORECAST_ENDPOINT};
pub use lookup::{LookupStart, WeatherLookup, WeatherRequest, FETCHING_TEXT};

use serde::{Deserialize, Serialize};

/// Latitude/longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
