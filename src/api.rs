//! HTTP client for the weather backend, plus the geolocation and geocoding
//! lookups that resolve a position without one being supplied.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::state::{
    CurrentWeatherSnapshot, GeoPosition, HistoricalSeries, Series, SeriesStats,
};

const IP_GEOLOCATION_URL: &str = "https://ipapi.co/json/";
const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Why a fetch produced no data. The display strings double as the
/// user-facing error text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The backend could not be reached or answered with a non-success
    /// status.
    #[error("Backend server is not responding.")]
    BackendUnreachable,
    /// The backend answered but carried no usable data.
    #[error("{0}")]
    NoDataFound(String),
}

impl FetchError {
    pub fn no_data() -> Self {
        Self::NoDataFound("No historical data found.".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentWeatherBody {
    error: Option<String>,
    location_name: Option<String>,
    local_time: Option<String>,
    current_temperature: Option<f64>,
    current_precipitation: Option<f64>,
    current_wind_speed: Option<f64>,
    #[serde(default)]
    units: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoricalBody {
    error: Option<String>,
    historical_details: Option<HistoricalDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoricalDetails {
    temperatures: Option<SeriesBody>,
    precipitation: Option<SeriesBody>,
    wind_speeds: Option<SeriesBody>,
}

#[derive(Debug, Deserialize)]
struct SeriesBody {
    unit: Option<String>,
    #[serde(default)]
    years: Vec<i32>,
    /// Nullable per element; a year with no reading is dropped together
    /// with its value.
    #[serde(default)]
    values: Vec<Option<f64>>,
    stats: Option<StatsBody>,
}

#[derive(Debug, Deserialize)]
struct StatsBody {
    mean: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct IpGeolocationBody {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GeocodingBody {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

/// A place-name search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub name: String,
    pub position: GeoPosition,
}

/// Client for the dashboard backend. Cheap to clone, the underlying
/// connection pool is shared.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Current conditions at a position.
    pub async fn fetch_current(
        &self,
        position: GeoPosition,
    ) -> Result<CurrentWeatherSnapshot, FetchError> {
        let url = format!("{}/api/current-weather", self.base_url);
        debug!(%url, lat = position.lat, lon = position.lng, "fetching current weather");

        let response = self
            .http
            .get(&url)
            .query(&[("lat", position.lat), ("lon", position.lng)])
            .send()
            .await
            .map_err(|_| FetchError::BackendUnreachable)?;
        if !response.status().is_success() {
            return Err(FetchError::BackendUnreachable);
        }
        let text = response
            .text()
            .await
            .map_err(|_| FetchError::BackendUnreachable)?;
        parse_current(&text)
    }

    /// Historical series for a month/day across years.
    pub async fn fetch_historical(
        &self,
        position: GeoPosition,
        month: u32,
        day: u32,
    ) -> Result<HistoricalSeries, FetchError> {
        let url = format!("{}/api/historical-stats", self.base_url);
        debug!(%url, lat = position.lat, lon = position.lng, month, day, "fetching historical stats");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", position.lat.to_string()),
                ("lon", position.lng.to_string()),
                ("month", month.to_string()),
                ("day", day.to_string()),
            ])
            .send()
            .await
            .map_err(|_| FetchError::BackendUnreachable)?;
        if !response.status().is_success() {
            return Err(FetchError::BackendUnreachable);
        }
        let text = response
            .text()
            .await
            .map_err(|_| FetchError::BackendUnreachable)?;
        parse_historical(&text)
    }

    /// Approximate position from the caller's public IP.
    pub async fn device_location(&self) -> Result<GeoPosition, FetchError> {
        let body: IpGeolocationBody = self
            .http
            .get(IP_GEOLOCATION_URL)
            .send()
            .await
            .map_err(|_| FetchError::BackendUnreachable)?
            .json()
            .await
            .map_err(|_| FetchError::BackendUnreachable)?;

        match (body.latitude, body.longitude) {
            (Some(lat), Some(lng)) => {
                let position = GeoPosition::new(lat, lng);
                if position.is_valid() {
                    Ok(position)
                } else {
                    Err(FetchError::NoDataFound(
                        "Could not get your location.".to_string(),
                    ))
                }
            }
            _ => Err(FetchError::NoDataFound(
                "Could not get your location.".to_string(),
            )),
        }
    }

    /// Resolve a place name to coordinates, best match first.
    pub async fn geocode(&self, query: &str) -> Result<GeocodedPlace, FetchError> {
        let body: GeocodingBody = self
            .http
            .get(GEOCODING_URL)
            .query(&[("name", query), ("count", "1")])
            .send()
            .await
            .map_err(|_| FetchError::BackendUnreachable)?
            .json()
            .await
            .map_err(|_| FetchError::BackendUnreachable)?;

        let hit = body.results.into_iter().next().ok_or_else(|| {
            FetchError::NoDataFound(format!("No place named \"{query}\" found."))
        })?;
        let name = match hit.country {
            Some(country) => format!("{}, {}", hit.name, country),
            None => hit.name,
        };
        Ok(GeocodedPlace {
            name,
            position: GeoPosition::new(hit.latitude, hit.longitude),
        })
    }
}

fn parse_current(body: &str) -> Result<CurrentWeatherSnapshot, FetchError> {
    let body: CurrentWeatherBody =
        serde_json::from_str(body).map_err(|_| FetchError::no_data())?;
    if let Some(message) = body.error {
        return Err(FetchError::NoDataFound(message));
    }

    let temperature = body.current_temperature.ok_or_else(FetchError::no_data)?;
    let unit_for = |key: &str, fallback: &str| {
        body.units
            .get(key)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };

    Ok(CurrentWeatherSnapshot {
        location_name: body
            .location_name
            .unwrap_or_else(|| "Unknown location".to_string()),
        local_time: body.local_time.unwrap_or_else(|| "Not Available".to_string()),
        temperature,
        precipitation: body.current_precipitation.unwrap_or(0.0),
        wind_speed: body.current_wind_speed.unwrap_or(0.0),
        temperature_unit: unit_for("temperature_2m", "°C"),
        precipitation_unit: unit_for("precipitation", "mm"),
    })
}

/// Validate a historical-stats response body. Pure, so the error taxonomy
/// is testable without a server.
pub fn parse_historical(body: &str) -> Result<HistoricalSeries, FetchError> {
    let body: HistoricalBody = serde_json::from_str(body).map_err(|_| FetchError::no_data())?;
    if let Some(message) = body.error {
        return Err(FetchError::NoDataFound(message));
    }
    let details = body.historical_details.ok_or_else(FetchError::no_data)?;

    let temperatures = validate_series(details.temperatures)?;
    let precipitation = validate_series(details.precipitation)?;
    let wind_speeds = validate_series(details.wind_speeds)?;

    Ok(HistoricalSeries {
        temperatures,
        precipitation,
        wind_speeds,
    })
}

fn validate_series(body: Option<SeriesBody>) -> Result<Series, FetchError> {
    let body = body.ok_or_else(FetchError::no_data)?;
    if body.years.len() != body.values.len() {
        return Err(FetchError::no_data());
    }

    // Drop years whose reading is null, keeping the pairing intact.
    let mut years = Vec::new();
    let mut values = Vec::new();
    for (year, value) in body.years.iter().zip(body.values.iter()) {
        if let Some(v) = value {
            years.push(*year);
            values.push(*v);
        }
    }
    if values.is_empty() {
        return Err(FetchError::no_data());
    }

    let computed_mean = values.iter().sum::<f64>() / values.len() as f64;
    let stats = match body.stats {
        Some(stats) => SeriesStats {
            mean: stats.mean.unwrap_or(computed_mean),
            min: stats.min,
            max: stats.max,
        },
        None => SeriesStats {
            mean: computed_mean,
            min: None,
            max: None,
        },
    };

    Ok(Series {
        unit: body.unit.unwrap_or_default(),
        years,
        values,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_BODY: &str = r#"{
        "historicalDetails": {
            "temperatures": {
                "unit": "°C",
                "years": [2021, 2022, 2023],
                "values": [21.0, null, 25.0],
                "stats": {"mean": 23.0, "median": 23.0, "min": 21.0, "max": 25.0}
            },
            "precipitation": {
                "unit": "mm",
                "years": [2021, 2022, 2023],
                "values": [0.0, 1.4, 0.1],
                "stats": {"mean": 0.5, "median": 0.1, "min": 0.0, "max": 1.4}
            },
            "windSpeeds": {
                "unit": "km/h",
                "years": [2021, 2022, 2023],
                "values": [10.0, 12.0, 14.0],
                "stats": {"mean": 12.0, "median": 12.0, "min": 10.0, "max": 14.0}
            }
        }
    }"#;

    #[test]
    fn parses_valid_body_and_drops_null_readings() {
        let historical = parse_historical(GOOD_BODY).unwrap();

        assert_eq!(historical.temperatures.years, vec![2021, 2023]);
        assert_eq!(historical.temperatures.values, vec![21.0, 25.0]);
        assert_eq!(historical.temperatures.stats.mean, 23.0);
        assert_eq!(historical.precipitation.values.len(), 3);
        assert_eq!(historical.wind_speeds.unit, "km/h");
    }

    #[test]
    fn error_field_maps_to_no_data() {
        let err = parse_historical(r#"{"error": "No historical data found for this date range."}"#)
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::NoDataFound("No historical data found for this date range.".to_string())
        );
    }

    #[test]
    fn missing_payload_maps_to_no_data() {
        assert_eq!(parse_historical("{}").unwrap_err(), FetchError::no_data());
        assert_eq!(
            parse_historical(r#"{"historicalDetails": {}}"#).unwrap_err(),
            FetchError::no_data()
        );
    }

    #[test]
    fn unparseable_body_maps_to_no_data() {
        assert_eq!(
            parse_historical("<html>bad gateway</html>").unwrap_err(),
            FetchError::no_data()
        );
    }

    #[test]
    fn mismatched_years_and_values_map_to_no_data() {
        let body = r#"{
            "historicalDetails": {
                "temperatures": {"unit": "°C", "years": [2021, 2022], "values": [20.0]},
                "precipitation": {"unit": "mm", "years": [2021, 2022], "values": [0.1, 0.2]},
                "windSpeeds": {"unit": "km/h", "years": [2021, 2022], "values": [5.0, 6.0]}
            }
        }"#;
        assert_eq!(parse_historical(body).unwrap_err(), FetchError::no_data());
    }

    #[test]
    fn all_null_series_maps_to_no_data() {
        let body = r#"{
            "historicalDetails": {
                "temperatures": {"unit": "°C", "years": [2021], "values": [null], "stats": null},
                "precipitation": {"unit": "mm", "years": [2021], "values": [0.1], "stats": null},
                "windSpeeds": {"unit": "km/h", "years": [2021], "values": [5.0], "stats": null}
            }
        }"#;
        assert_eq!(parse_historical(body).unwrap_err(), FetchError::no_data());
    }

    #[test]
    fn missing_stats_fall_back_to_computed_mean() {
        let body = r#"{
            "historicalDetails": {
                "temperatures": {"unit": "°C", "years": [2021, 2022], "values": [10.0, 20.0]},
                "precipitation": {"unit": "mm", "years": [2021, 2022], "values": [1.0, 3.0]},
                "windSpeeds": {"unit": "km/h", "years": [2021, 2022], "values": [4.0, 6.0]}
            }
        }"#;
        let historical = parse_historical(body).unwrap();
        assert_eq!(historical.temperatures.stats.mean, 15.0);
        assert_eq!(historical.precipitation.stats.mean, 2.0);
        assert!(historical.wind_speeds.stats.min.is_none());
    }

    #[test]
    fn parses_current_weather_body() {
        let body = r#"{
            "locationName": "Delhi, India",
            "localTime": "04:30 PM, Sun Jun 15",
            "currentTemperature": 34.2,
            "currentPrecipitation": 0.0,
            "currentWindSpeed": 11.5,
            "units": {"temperature_2m": "°C", "precipitation": "mm"}
        }"#;
        let snapshot = parse_current(body).unwrap();
        assert_eq!(snapshot.location_name, "Delhi, India");
        assert_eq!(snapshot.temperature, 34.2);
        assert_eq!(snapshot.temperature_unit, "°C");
    }

    #[test]
    fn current_weather_error_field_maps_to_no_data() {
        let err = parse_current(r#"{"error": "Invalid coordinates."}"#).unwrap_err();
        assert_eq!(
            err,
            FetchError::NoDataFound("Invalid coordinates.".to_string())
        );
    }
}
