use std::path::Path;

use gyropanel_core::weather::LookupStart;
use gyropanel_core::{Coordinates, OpenMeteoClient, StaticLocator, WeatherLookup};

use super::{load_config, runtime};

/// Look up current conditions once. Command-line coordinates win over the
/// configured location and skip the location permission.
pub fn run(
    config_path: Option<&Path>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let locator = match (lat, lon) {
        (Some(latitude), Some(longitude)) => StaticLocator {
            coordinates: Some(Coordinates {
                latitude,
                longitude,
            }),
            permitted: true,
        },
        (None, None) => StaticLocator {
            coordinates: config.weather.coordinates(),
            permitted: config.weather.location_permission,
        },
        _ => return Err("--lat and --lon must be given together".into()),
    };

    let mut lookup = WeatherLookup::new();
    let request = match lookup.trigger(true, &locator) {
        LookupStart::Request(request) => request,
        LookupStart::Failed(err) => return Err(err.into()),
        LookupStart::Skipped => return Ok(()),
    };

    let client = OpenMeteoClient::new(config.weather.endpoint.as_str());
    let outcome = runtime()?.block_on(client.fetch(&request));
    match lookup.complete(&request, outcome) {
        Some(Ok(text)) => println!("{text}"),
        Some(Err(err)) => return Err(err.into()),
        None => {}
    }
    Ok(())
}
