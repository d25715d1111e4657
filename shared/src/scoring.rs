//! Rule-based crop scoring
//!
//! Each crop earns one point per factor (nitrogen, phosphorus, potassium, pH,
//! rainfall) whose measured value lies inside the crop's ideal range. The
//! confidence score is the share of the five factors satisfied, as a
//! percentage, so it is always one of 0, 20, 40, 60, 80 or 100.

use crate::models::{CropProfile, SoilSample};

/// Number of factors each crop is scored on
pub const SCORING_FACTORS: u32 = 5;

/// A crop paired with the confidence it scored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCrop<'a> {
    pub crop: &'a CropProfile,
    pub confidence: f64,
}

/// Count the factors of `soil` and `rainfall` that fall inside the crop's ideal ranges
pub fn matched_factors(crop: &CropProfile, soil: &SoilSample, rainfall: f64) -> u32 {
    [
        crop.nitrogen.contains(soil.nitrogen),
        crop.phosphorus.contains(soil.phosphorus),
        crop.potassium.contains(soil.potassium),
        crop.ph.contains(soil.ph),
        crop.rainfall.contains(rainfall),
    ]
    .into_iter()
    .filter(|matched| *matched)
    .count() as u32
}

/// Confidence percentage for a single crop
pub fn confidence_score(crop: &CropProfile, soil: &SoilSample, rainfall: f64) -> f64 {
    // Multiply before dividing so every score is exact.
    f64::from(matched_factors(crop, soil, rainfall) * 100) / f64::from(SCORING_FACTORS)
}

/// Score every crop and return the best match.
///
/// Only a strictly higher confidence replaces the current best, so among
/// equally scored crops the first one in catalog order wins. The tie-break is
/// deterministic but carries no agronomic meaning.
pub fn best_match<'a>(
    crops: &'a [CropProfile],
    soil: &SoilSample,
    rainfall: f64,
) -> Option<ScoredCrop<'a>> {
    let mut best: Option<ScoredCrop<'a>> = None;
    for crop in crops {
        let confidence = confidence_score(crop, soil, rainfall);
        if best.map_or(true, |b| confidence > b.confidence) {
            best = Some(ScoredCrop { crop, confidence });
        }
    }
    best
}

/// Human-readable summary of a recommendation
pub fn summary_message(crop_name: &str, confidence: f64) -> String {
    format!("Best match: {} ({:.1}% confidence)", crop_name, confidence)
}
