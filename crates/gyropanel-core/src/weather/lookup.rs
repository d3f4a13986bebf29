use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Coordinates, CurrentWeather};
use crate::collaborators::Locator;
use crate::error::WeatherError;

pub const FETCHING_TEXT: &str = "Fetching weather...";

/// A forecast request the driver should perform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherRequest {
    /// Increases with every request so late outcomes can be told apart.
    pub seq: u64,
    pub coordinates: Coordinates,
}

/// Result of asking the lookup to refresh.
#[derive(Debug)]
pub enum LookupStart {
    /// Already fetched and no refresh was forced.
    Skipped,
    /// Location could not be obtained; nothing to fetch.
    Failed(WeatherError),
    /// Perform this request and report back through `complete`.
    Request(WeatherRequest),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherLookup {
    fetched: bool,
    pending: Option<WeatherRequest>,
    next_seq: u64,
}

impl WeatherLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch is done or underway. Cleared by any failure except
    /// a host with no location source at all.
    pub fn fetched(&self) -> bool {
        self.fetched
    }

    pub fn pending(&self) -> Option<WeatherRequest> {
        self.pending
    }

    pub fn trigger(&mut self, force: bool, locator: &dyn Locator) -> LookupStart {
        if self.fetched && !force {
            return LookupStart::Skipped;
        }
        self.fetched = true;

        match locator.current_position() {
            Ok(coordinates) => {
                let request = WeatherRequest {
                    seq: self.next_seq,
                    coordinates,
                };
                self.next_seq += 1;
                self.pending = Some(request);
                LookupStart::Request(request)
            }
            Err(WeatherError::GeolocationUnsupported) => {
                self.pending = None;
                LookupStart::Failed(WeatherError::GeolocationUnsupported)
            }
            Err(err) => {
                warn!(error = %err, "location lookup failed");
                self.fetched = false;
                self.pending = None;
                LookupStart::Failed(err)
            }
        }
    }

    /// Record the outcome of `request`, returning the panel text.
    ///
    /// Outcomes for a request that has been superseded by a newer trigger
    /// are ignored and yield `None`.
    pub fn complete(
        &mut self,
        request: &WeatherRequest,
        outcome: Result<CurrentWeather, WeatherError>,
    ) -> Option<Result<String, WeatherError>> {
        if self.pending.as_ref() != Some(request) {
            return None;
        }
        self.pending = None;
        match outcome {
            Ok(current) => Some(Ok(render(&request.coordinates, &current))),
            Err(err) => {
                warn!(error = ?err, "weather fetch failed");
                self.fetched = false;
                Some(Err(err))
            }
        }
    }
}

fn render(at: &Coordinates, current: &CurrentWeather) -> String {
    format!(
        "🌍 Lat: {:.2}, Lon: {:.2} | 🌡 Temp: {}°C, 💨 Wind: {} km/h",
        at.latitude, at.longitude, current.temperature, current.windspeed
    )
}
