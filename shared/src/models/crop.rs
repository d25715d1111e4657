//! Crop catalog models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::IdealRange;

/// A crop with the ideal growing range for each scored factor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub id: Uuid,
    pub name: String,
    pub nitrogen: IdealRange,
    pub phosphorus: IdealRange,
    pub potassium: IdealRange,
    pub ph: IdealRange,
    /// Rainfall in mm
    pub rainfall: IdealRange,
}

/// Crop definition used to seed or import the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCrop {
    pub name: String,
    pub nitrogen: IdealRange,
    pub phosphorus: IdealRange,
    pub potassium: IdealRange,
    pub ph: IdealRange,
    pub rainfall: IdealRange,
}

impl NewCrop {
    /// Attach an identity, producing a catalog entry
    pub fn into_profile(self, id: Uuid) -> CropProfile {
        CropProfile {
            id,
            name: self.name,
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            ph: self.ph,
            rainfall: self.rainfall,
        }
    }
}

fn crop(
    name: &str,
    n: (f64, f64),
    p: (f64, f64),
    k: (f64, f64),
    ph: (f64, f64),
    rain: (f64, f64),
) -> NewCrop {
    NewCrop {
        name: name.to_string(),
        nitrogen: IdealRange::new(n.0, n.1),
        phosphorus: IdealRange::new(p.0, p.1),
        potassium: IdealRange::new(k.0, k.1),
        ph: IdealRange::new(ph.0, ph.1),
        rainfall: IdealRange::new(rain.0, rain.1),
    }
}

/// Reference catalog loaded into an empty database, in catalog order
pub fn default_crop_catalog() -> Vec<NewCrop> {
    vec![
        crop("Rice", (80.0, 120.0), (30.0, 50.0), (30.0, 50.0), (5.0, 7.0), (150.0, 300.0)),
        crop("Wheat", (60.0, 100.0), (25.0, 45.0), (25.0, 45.0), (6.0, 7.5), (50.0, 100.0)),
        crop("Maize", (90.0, 150.0), (40.0, 80.0), (40.0, 80.0), (5.5, 7.5), (60.0, 120.0)),
        crop("Cotton", (70.0, 120.0), (35.0, 60.0), (35.0, 60.0), (5.5, 8.0), (50.0, 100.0)),
        crop("Sugarcane", (100.0, 180.0), (45.0, 90.0), (45.0, 90.0), (5.0, 8.5), (120.0, 250.0)),
        crop("Jute", (50.0, 90.0), (20.0, 40.0), (20.0, 40.0), (6.0, 7.5), (150.0, 300.0)),
        crop("Coconut", (40.0, 80.0), (20.0, 35.0), (40.0, 80.0), (5.0, 8.0), (100.0, 250.0)),
        crop("Papaya", (60.0, 100.0), (30.0, 50.0), (40.0, 70.0), (5.5, 7.0), (100.0, 200.0)),
        crop("Orange", (70.0, 110.0), (35.0, 55.0), (40.0, 75.0), (5.5, 7.5), (60.0, 150.0)),
        crop("Apple", (50.0, 90.0), (25.0, 45.0), (50.0, 90.0), (5.5, 7.0), (50.0, 120.0)),
        crop("Grapes", (60.0, 100.0), (30.0, 50.0), (50.0, 90.0), (5.5, 7.5), (40.0, 100.0)),
        crop("Mango", (55.0, 95.0), (25.0, 45.0), (40.0, 75.0), (5.5, 7.5), (80.0, 200.0)),
        crop("Bean", (40.0, 80.0), (25.0, 45.0), (35.0, 65.0), (6.0, 7.5), (50.0, 150.0)),
        crop("Lentil", (30.0, 70.0), (20.0, 40.0), (25.0, 55.0), (5.5, 7.5), (40.0, 100.0)),
        crop("Chickpea", (35.0, 75.0), (25.0, 45.0), (30.0, 60.0), (5.5, 7.5), (40.0, 100.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_catalog_names_unique() {
        let catalog = default_crop_catalog();
        let names: HashSet<_> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(catalog.len(), 15);
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_default_catalog_ranges_ordered() {
        for crop in default_crop_catalog() {
            for range in [crop.nitrogen, crop.phosphorus, crop.potassium, crop.ph, crop.rainfall] {
                assert!(range.min <= range.max, "{} has an inverted range", crop.name);
            }
        }
    }
}
