//! Validation utilities for the Crop Recommendation Platform

use crate::models::{NewCrop, SoilSample};
use crate::types::IdealRange;

/// Maximum stored length of a location name
pub const MAX_LOCATION_LEN: usize = 255;

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate that a range is well formed (finite, min <= max)
pub fn validate_ideal_range(range: &IdealRange) -> Result<(), &'static str> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err("Ideal range bounds must be finite numbers");
    }
    if range.min > range.max {
        return Err("Ideal range minimum must not exceed its maximum");
    }
    Ok(())
}

/// Validate a crop definition before it enters the catalog
pub fn validate_new_crop(crop: &NewCrop) -> Result<(), &'static str> {
    if crop.name.trim().is_empty() {
        return Err("Crop name is required");
    }
    for range in [
        &crop.nitrogen,
        &crop.phosphorus,
        &crop.potassium,
        &crop.ph,
        &crop.rainfall,
    ] {
        validate_ideal_range(range)?;
    }
    Ok(())
}

// ============================================================================
// Measurement Validations
// ============================================================================

/// Reject NaN and infinite soil values, which range checks let through
pub fn validate_soil_finite(sample: &SoilSample) -> Result<(), &'static str> {
    let values = [
        sample.nitrogen,
        sample.phosphorus,
        sample.potassium,
        sample.ph,
        sample.moisture,
    ];
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err("Soil values must be finite numbers")
    }
}

/// Trim a location and treat blank input as absent
pub fn normalize_location(location: Option<&str>) -> Option<&str> {
    location.map(str::trim).filter(|l| !l.is_empty())
}

/// Validate a location name for a weather lookup
pub fn validate_location(location: &str) -> Result<(), &'static str> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err("Location is required");
    }
    if trimmed.chars().count() > MAX_LOCATION_LEN {
        return Err("Location must be at most 255 characters");
    }
    Ok(())
}
