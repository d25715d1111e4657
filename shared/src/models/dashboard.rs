//! Dashboard chart data models
//!
//! Each dashboard is a set of parallel series: `labels[i]` belongs to the
//! i-th value of every other series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::recommendation::{CropCount, RecommendationSummary};
use super::soil::SoilReading;
use super::weather::WeatherReading;

/// Minute-resolution chart label, e.g. `2024-06-01T09:30`
pub fn chart_label(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M").to_string()
}

/// Soil nutrient trend and recent recommendations for one farmer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FarmerDashboard {
    pub npk_labels: Vec<String>,
    pub nitrogen: Vec<f64>,
    pub phosphorus: Vec<f64>,
    pub potassium: Vec<f64>,
    pub recommendations: Vec<RecommendationSummary>,
}

impl FarmerDashboard {
    pub fn new(soil: &[SoilReading], recommendations: Vec<RecommendationSummary>) -> Self {
        Self {
            npk_labels: soil.iter().map(|s| chart_label(s.recorded_at)).collect(),
            nitrogen: soil.iter().map(|s| s.nitrogen).collect(),
            phosphorus: soil.iter().map(|s| s.phosphorus).collect(),
            potassium: soil.iter().map(|s| s.potassium).collect(),
            recommendations,
        }
    }
}

/// Rainfall and temperature trend for extension officers
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OfficerDashboard {
    pub rainfall_labels: Vec<String>,
    pub rainfall: Vec<f64>,
    pub temperature: Vec<f64>,
}

impl From<&[WeatherReading]> for OfficerDashboard {
    fn from(readings: &[WeatherReading]) -> Self {
        Self {
            rainfall_labels: readings.iter().map(|w| chart_label(w.recorded_at)).collect(),
            rainfall: readings.iter().map(|w| w.rainfall).collect(),
            temperature: readings.iter().map(|w| w.temperature).collect(),
        }
    }
}

/// Most recommended crops across all users
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminDashboard {
    pub top_crop_names: Vec<String>,
    pub top_crop_counts: Vec<i64>,
}

impl From<Vec<CropCount>> for AdminDashboard {
    fn from(counts: Vec<CropCount>) -> Self {
        let (top_crop_names, top_crop_counts): (Vec<String>, Vec<i64>) =
            counts.into_iter().map(|c| (c.crop_name, c.count)).unzip();
        Self {
            top_crop_names,
            top_crop_counts,
        }
    }
}
