//! Weather data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored weather observation for a named location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    pub id: Uuid,
    pub location: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    /// Millimetres over the last 1h (or 3h when only that is reported)
    pub rainfall: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Where a resolved reading came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherSource {
    Cached,
    Fetched,
}

impl std::fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherSource::Cached => write!(f, "cached"),
            WeatherSource::Fetched => write!(f, "fetched"),
        }
    }
}

/// Current weather as returned to API callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub location: String,
    pub recorded_at: DateTime<Utc>,
}

impl From<WeatherReading> for CurrentWeather {
    fn from(reading: WeatherReading) -> Self {
        Self {
            temperature: reading.temperature,
            humidity: reading.humidity,
            rainfall: reading.rainfall,
            location: reading.location,
            recorded_at: reading.recorded_at,
        }
    }
}
