//! Business logic services for the Crop Recommendation Platform

pub mod crop;
pub mod dashboard;
pub mod recommendation;
pub mod soil;
pub mod weather;

pub use crop::CropService;
pub use dashboard::DashboardService;
pub use recommendation::RecommendationService;
pub use soil::SoilService;
pub use weather::{ResolvedWeather, WeatherService};
