//! Location aggregator: one location's surveillance minutes.
//!
//! adjusted = base × stocking multiplier × plant-parts surcharge.
//! Travel between locations is a farm-level overhead and is not added here.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::entities::Location;
use crate::domain::stocking::stocking_multiplier;
use crate::domain::tree_time::estimate_tree_minutes;

/// Flat per-tree minutes used by the quick estimate.
pub const QUICK_MINUTES_PER_TREE: f64 = 6.0;

/// Surcharge for inspecting individual plant parts (leaves, fruit, ...).
pub const PLANT_PARTS_FACTOR: f64 = 1.15;

/// How base minutes are derived for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Sum of per-tree estimates from the tree time model.
    #[default]
    Detailed,
    /// Flat minutes per tree, ignoring tree attributes.
    Quick,
}

impl std::fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationMode::Detailed => write!(f, "detailed"),
            CalculationMode::Quick => write!(f, "quick"),
        }
    }
}

impl std::str::FromStr for CalculationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detailed" => Ok(CalculationMode::Detailed),
            "quick" => Ok(CalculationMode::Quick),
            other => Err(format!(
                "unknown calculation mode '{other}' (expected detailed or quick)"
            )),
        }
    }
}

/// Per-location breakdown row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationEffort {
    pub location_name: String,
    pub tree_count: usize,
    pub base_minutes: f64,
    pub adjusted_minutes: f64,
    pub stocking_rate: Option<f64>,
    pub stocking_multiplier: f64,
    /// Set when the recorded area was not positive and the rate was ignored.
    pub invalid_area: bool,
}

/// Surveillance minutes for one location, or `None` when it has no trees.
pub fn estimate_location_minutes(
    location: &Location,
    mode: CalculationMode,
) -> Option<LocationEffort> {
    let tree_count = location.tree_count();
    if tree_count == 0 {
        return None;
    }

    let base_minutes = match mode {
        CalculationMode::Detailed => location.trees.iter().map(estimate_tree_minutes).sum(),
        CalculationMode::Quick => tree_count as f64 * QUICK_MINUTES_PER_TREE,
    };

    let (stocking_rate, invalid_area) = match location.stocking_rate() {
        Ok(rate) => (rate, false),
        Err(e) => {
            warn!("{e}; using neutral stocking multiplier");
            (None, true)
        }
    };
    let multiplier = stocking_multiplier(stocking_rate);

    Some(LocationEffort {
        location_name: location.name.clone(),
        tree_count,
        base_minutes,
        adjusted_minutes: base_minutes * multiplier * PLANT_PARTS_FACTOR,
        stocking_rate,
        stocking_multiplier: multiplier,
        invalid_area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{HealthStatus, Tree};
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn juvenile_block(trees: usize, area: Option<f64>) -> Location {
        let mut location = Location::new("Block A").with_trees((0..trees).map(|i| {
            Tree::new(format!("T-{i}"), 5)
                .with_height(3.0)
                .with_health(HealthStatus::Good)
        }));
        location.area_hectares = area;
        location
    }

    #[test]
    fn given_empty_location_when_estimating_then_excluded() {
        let empty = Location::new("Empty");
        assert!(estimate_location_minutes(&empty, CalculationMode::Detailed).is_none());
        assert!(estimate_location_minutes(&empty, CalculationMode::Quick).is_none());
    }

    #[test]
    fn given_low_density_block_when_detailed_then_applies_multiplier_and_surcharge() {
        let block = juvenile_block(10, Some(2.0));
        let effort = estimate_location_minutes(&block, CalculationMode::Detailed).unwrap();
        assert_eq!(effort.tree_count, 10);
        assert_relative_eq!(effort.base_minutes, 45.0, epsilon = 1e-9);
        assert_eq!(effort.stocking_rate, Some(5.0));
        assert_eq!(effort.stocking_multiplier, 0.9);
        assert_relative_eq!(effort.adjusted_minutes, 46.575, epsilon = 1e-9);
        assert!(!effort.invalid_area);
    }

    #[test]
    fn given_block_when_quick_then_six_minutes_per_tree() {
        let block = juvenile_block(10, Some(2.0));
        let effort = estimate_location_minutes(&block, CalculationMode::Quick).unwrap();
        assert_relative_eq!(effort.base_minutes, 60.0, epsilon = 1e-9);
        assert_relative_eq!(effort.adjusted_minutes, 60.0 * 0.9 * 1.15, epsilon = 1e-9);
    }

    #[test]
    fn given_high_density_block_when_estimating_then_multiplier_above_one() {
        let block = juvenile_block(101, Some(1.0));
        let effort = estimate_location_minutes(&block, CalculationMode::Quick).unwrap();
        assert_eq!(effort.stocking_multiplier, 1.2);
    }

    #[test]
    fn given_unknown_area_when_estimating_then_rate_absent_and_neutral() {
        let block = juvenile_block(4, None);
        let effort = estimate_location_minutes(&block, CalculationMode::Detailed).unwrap();
        assert_eq!(effort.stocking_rate, None);
        assert_eq!(effort.stocking_multiplier, 1.0);
        assert!(!effort.invalid_area);
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-1.5)]
    #[case::nan(f64::NAN)]
    fn given_invalid_area_when_estimating_then_soft_degrades(#[case] area: f64) {
        let block = juvenile_block(4, Some(area));
        let effort = estimate_location_minutes(&block, CalculationMode::Detailed).unwrap();
        assert_eq!(effort.stocking_rate, None);
        assert_eq!(effort.stocking_multiplier, 1.0);
        assert!(effort.invalid_area);
        assert_relative_eq!(effort.adjusted_minutes, 18.0 * 1.15, epsilon = 1e-9);
    }
}
