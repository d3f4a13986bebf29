//! Open-Meteo forecast client -- current conditions by coordinates, no API key.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::WeatherRequest;
use crate::error::WeatherError;

pub const DEFAULT_FORECAST_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

/// The two fields of `current_weather` the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
}

pub struct OpenMeteoClient {
    endpoint: String,
    http: Client,
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new(DEFAULT_FORECAST_ENDPOINT)
    }
}

impl OpenMeteoClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Forecast URL for the request's coordinates.
    pub fn url_for(&self, request: &WeatherRequest) -> Result<Url, WeatherError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("latitude", request.coordinates.latitude.to_string()),
                ("longitude", request.coordinates.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ],
        )
        .map_err(WeatherError::InvalidEndpoint)
    }

    /// GET the forecast. The HTTP status is not inspected: any body without
    /// a usable `current_weather` object is reported as unavailable.
    pub async fn fetch(&self, request: &WeatherRequest) -> Result<CurrentWeather, WeatherError> {
        let url = self.url_for(request)?;
        let resp = self.http.get(url).send().await?;
        let body = resp.text().await?;
        parse_current_weather(&body)
    }
}

/// Extract `current_weather.{temperature, windspeed}` from a forecast body.
pub(crate) fn parse_current_weather(body: &str) -> Result<CurrentWeather, WeatherError> {
    let json: serde_json::Value = serde_json::from_str(body)?;
    let current = json
        .get("current_weather")
        .ok_or(WeatherError::MissingCurrentWeather)?;
    let field = |name: &str| {
        current
            .get(name)
            .and_then(serde_json::Value::as_f64)
            .ok_or(WeatherError::MissingCurrentWeather)
    };
    Ok(CurrentWeather {
        temperature: field("temperature")?,
        windspeed: field("windspeed")?,
    })
}
