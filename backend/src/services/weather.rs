//! Weather service: cache-first rainfall resolution and live lookups

use std::sync::Arc;

use chrono::{Duration, Utc};
use shared::{validate_location, CurrentWeather, Limit, WeatherReading, WeatherSource};

use crate::error::{AppError, AppResult};
use crate::external::WeatherProvider;
use crate::repositories::WeatherReadingRepository;

/// Weather service for resolving and storing weather readings
#[derive(Clone)]
pub struct WeatherService {
    readings: Arc<dyn WeatherReadingRepository>,
    provider: Arc<dyn WeatherProvider>,
    cache_max_age: Option<Duration>,
}

/// A reading chosen for a location, with where it came from
#[derive(Debug, Clone)]
pub struct ResolvedWeather {
    pub rainfall: f64,
    pub source: WeatherSource,
    pub reading: WeatherReading,
}

impl WeatherService {
    /// Create a service that reuses stored readings of any age
    pub fn new(
        readings: Arc<dyn WeatherReadingRepository>,
        provider: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            readings,
            provider,
            cache_max_age: None,
        }
    }

    /// Ignore stored readings older than `minutes`; `None` keeps any age
    pub fn with_cache_max_age(mut self, minutes: Option<i64>) -> Self {
        self.cache_max_age = minutes.filter(|m| *m >= 0).map(Duration::minutes);
        self
    }

    /// Latest stored reading for the location within the cache horizon
    pub async fn cached_reading(&self, location: &str) -> AppResult<Option<WeatherReading>> {
        let recorded_after = self.cache_max_age.map(|age| Utc::now() - age);
        self.readings
            .latest_for_location(location, recorded_after)
            .await
    }

    /// Call the provider and append the result as a new reading
    pub async fn fetch_and_store(&self, location: &str) -> AppResult<WeatherReading> {
        let observation = self.provider.current(location).await?;
        let reading = self.readings.insert(location, &observation).await?;

        tracing::info!(
            location,
            rainfall = reading.rainfall,
            temperature = reading.temperature,
            "Stored weather reading"
        );

        Ok(reading)
    }

    /// Resolve rainfall for a location, preferring a stored reading over a live fetch
    pub async fn resolve_rainfall(&self, location: &str) -> AppResult<ResolvedWeather> {
        let location = checked_location(location)?;
        if let Some(reading) = self.cached_reading(location).await? {
            tracing::debug!(location, source = %WeatherSource::Cached, "Using stored weather");
            return Ok(ResolvedWeather {
                rainfall: reading.rainfall,
                source: WeatherSource::Cached,
                reading,
            });
        }

        let reading = self.fetch_and_store(location).await?;
        tracing::debug!(location, source = %WeatherSource::Fetched, "Fetched weather");
        Ok(ResolvedWeather {
            rainfall: reading.rainfall,
            source: WeatherSource::Fetched,
            reading,
        })
    }

    /// Fresh conditions for a location; always calls the provider
    pub async fn current_weather(&self, location: &str) -> AppResult<CurrentWeather> {
        let location = checked_location(location)?;
        let reading = self.fetch_and_store(location).await?;
        Ok(reading.into())
    }

    /// Stored readings, newest first
    pub async fn history(
        &self,
        location: Option<&str>,
        limit: Limit,
    ) -> AppResult<Vec<WeatherReading>> {
        self.readings.list_recent(location, limit).await
    }
}

fn checked_location(location: &str) -> AppResult<&str> {
    let location = location.trim();
    validate_location(location).map_err(|message| AppError::Validation {
        field: "location".to_string(),
        message: message.to_string(),
    })?;
    Ok(location)
}
