//! Configuration management for the Crop Recommendation Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT authentication configuration
    pub jwt: JwtConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Recommendation and reporting limits
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key used to verify bearer tokens
    pub secret: String,
}

#[derive(Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeather API key
    pub api_key: String,

    /// Base URL of the OpenWeather data API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Ignore cached readings older than this many minutes (unset: reuse any age)
    pub cache_max_age_minutes: Option<i64>,
}

// The API key must never reach a log line through `{:?}`.
impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_max_age_minutes", &self.cache_max_age_minutes)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendationConfig {
    /// Default number of history entries returned
    pub history_limit: i64,

    /// Number of crops in the admin top-crops report
    pub top_crops_limit: i64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CROP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8080)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("weather.api_key", "")?
            .set_default("weather.base_url", WeatherConfig::DEFAULT_BASE_URL)?
            .set_default("weather.timeout_secs", WeatherConfig::DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("recommendation.history_limit", 10)?
            .set_default("recommendation.top_crops_limit", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ prefix)
            .add_source(
                Environment::with_prefix("CROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl WeatherConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openweathermap.org/data/2.5";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            cache_max_age_minutes: None,
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            history_limit: 10,
            top_crops_limit: 10,
        }
    }
}
