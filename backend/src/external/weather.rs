//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current-weather endpoint, queried by
//! city name in metric units.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::config::WeatherConfig;

/// Failures talking to the weather provider
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Provider rejected the API key (HTTP 401) or none is configured
    #[error("Weather API key is invalid or missing; check the weather.api_key setting")]
    InvalidApiKey,

    /// Provider does not know the location (HTTP 404)
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Weather API did not respond within {0}s")]
    Timeout(u64),

    #[error("Weather API returned status {0}")]
    Provider(u16),

    #[error("Weather API request failed: {0}")]
    Request(String),

    #[error("Failed to parse weather response: {0}")]
    Decode(String),
}

/// Current conditions reported by the provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherObservation {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

/// Source of live weather observations
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions for a city name
    async fn current(&self, location: &str) -> Result<WeatherObservation, WeatherError>;
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout_secs: u64,
}

impl WeatherClient {
    /// Create a new WeatherClient with the configured host, key and timeout
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::Request(e.without_url().to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> WeatherError {
        if e.is_timeout() {
            WeatherError::Timeout(self.timeout_secs)
        } else {
            // The URL carries the API key in its query string.
            WeatherError::Request(e.without_url().to_string())
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current(&self, location: &str) -> Result<WeatherObservation, WeatherError> {
        if self.api_key.is_empty() {
            tracing::error!(location, "Weather API key not configured");
            return Err(WeatherError::InvalidApiKey);
        }

        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(location, status = status.as_u16(), "Weather API error");
            return Err(match status {
                StatusCode::UNAUTHORIZED => WeatherError::InvalidApiKey,
                StatusCode::NOT_FOUND => WeatherError::LocationNotFound(location.to_string()),
                other => WeatherError::Provider(other.as_u16()),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                WeatherError::Timeout(self.timeout_secs)
            } else {
                WeatherError::Decode(e.without_url().to_string())
            }
        })?;

        Ok(parse_observation(&body))
    }
}

/// Map an OpenWeatherMap response body to an observation.
///
/// Missing or non-numeric values read as 0.0. Rainfall uses the 1h total and
/// only falls back to the 3h total when 1h is absent or null.
pub fn parse_observation(body: &Value) -> WeatherObservation {
    let rainfall = match body.pointer("/rain/1h") {
        Some(one_hour) if !one_hour.is_null() => one_hour.as_f64(),
        _ => number_at(body, "/rain/3h"),
    }
    .unwrap_or(0.0);

    WeatherObservation {
        temperature: number_at(body, "/main/temp").unwrap_or(0.0),
        humidity: number_at(body, "/main/humidity").unwrap_or(0.0),
        rainfall,
    }
}

fn number_at(body: &Value, pointer: &str) -> Option<f64> {
    body.pointer(pointer).and_then(Value::as_f64)
}
