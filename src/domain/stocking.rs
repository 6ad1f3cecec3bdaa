//! Stocking density: the calculation multiplier and the reporting classifier.
//!
//! The two use different band tables. The 3-tier multiplier feeds the
//! minutes calculation; the 4-tier classifier is for human-readable
//! reporting only. Keep them separate: above 150 trees/ha the classifier
//! reports 40 % more time while the multiplier stays at 1.2, and between
//! 50 and 100 the classifier's "Standard" band starts at 50 exclusive
//! while the multiplier's low band ends at 50 exclusive.

use serde::Serialize;

use crate::domain::entities::Location;

// ============================================================================
// Calculation multiplier (3 tiers)
// ============================================================================

pub const HIGH_DENSITY_RATE: f64 = 100.0;
pub const LOW_DENSITY_RATE: f64 = 50.0;

/// Time multiplier for a stocking rate; 1.0 when the rate is unknown.
pub fn stocking_multiplier(rate: Option<f64>) -> f64 {
    match rate {
        Some(r) if r > HIGH_DENSITY_RATE => 1.2,
        Some(r) if r < LOW_DENSITY_RATE => 0.9,
        _ => 1.0,
    }
}

// ============================================================================
// Reporting classifier (4 tiers)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityBand {
    /// rate > 150
    VeryHigh,
    /// 100 < rate <= 150
    High,
    /// 50 < rate <= 100
    Standard,
    /// rate <= 50
    Low,
}

impl DensityBand {
    pub fn from_rate(rate: f64) -> Self {
        if rate > 150.0 {
            DensityBand::VeryHigh
        } else if rate > 100.0 {
            DensityBand::High
        } else if rate > 50.0 {
            DensityBand::Standard
        } else {
            DensityBand::Low
        }
    }

    pub fn classification(&self) -> &'static str {
        match self {
            DensityBand::VeryHigh => "Very High Density",
            DensityBand::High => "High Density",
            DensityBand::Standard => "Standard Density",
            DensityBand::Low => "Low Density",
        }
    }

    pub fn impact_description(&self) -> &'static str {
        match self {
            DensityBand::VeryHigh => "40% more time needed",
            DensityBand::High => "20% more time needed",
            DensityBand::Standard => "Standard time",
            DensityBand::Low => "10% less time needed",
        }
    }
}

/// Reporting view of a location's density.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockingClassification {
    pub location_name: String,
    pub rate: f64,
    pub band: DensityBand,
    pub classification: &'static str,
    pub impact_description: &'static str,
}

/// Classify a location's stocking density.
///
/// Absent when the location has no trees, no area, or a non-positive area.
pub fn classify_stocking_rate(location: &Location) -> Option<StockingClassification> {
    if location.trees.is_empty() {
        return None;
    }
    let rate = location.stocking_rate().ok().flatten()?;
    let band = DensityBand::from_rate(rate);
    Some(StockingClassification {
        location_name: location.name.clone(),
        rate,
        band,
        classification: band.classification(),
        impact_description: band.impact_description(),
    })
}
