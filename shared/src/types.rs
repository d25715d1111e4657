//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` interval of acceptable values for one growing factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

impl IdealRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Bounded result count for list endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Limit(i64);

impl Limit {
    /// Upper bound applied to every caller-supplied limit
    pub const MAX: i64 = 100;

    /// Use `requested` when it is positive, otherwise `default`; never above [`Limit::MAX`]
    pub fn resolve(requested: Option<i64>, default: i64) -> Self {
        let value = match requested {
            Some(n) if n > 0 => n,
            _ => default,
        };
        Self(value.clamp(1, Self::MAX))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}
