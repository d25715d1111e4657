//! External API integrations

pub mod weather;

pub use weather::{WeatherClient, WeatherError, WeatherObservation, WeatherProvider};
