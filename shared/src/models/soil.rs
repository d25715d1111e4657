//! Soil measurement models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Soil values supplied by a user, before they are stored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, PartialEq)]
pub struct SoilSample {
    #[validate(range(min = 0.0))]
    pub nitrogen: f64,
    #[validate(range(min = 0.0))]
    pub phosphorus: f64,
    #[validate(range(min = 0.0))]
    pub potassium: f64,
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph: f64,
    /// Recorded with every sample; not a scoring factor
    #[validate(range(min = 0.0))]
    pub moisture: f64,
}

/// A stored soil reading owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilReading {
    pub id: Uuid,
    pub user_id: Uuid,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
    pub moisture: f64,
    pub recorded_at: DateTime<Utc>,
}
