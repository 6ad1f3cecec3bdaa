//! Tree time model: expected inspection minutes for a single tree.
//!
//! minutes = round(BASE × age × size × health, 1)
//!
//! Every missing or unrecognised attribute resolves to a neutral 1.0
//! multiplier, so the result is always positive.

use crate::domain::entities::{AgeGroup, HealthStatus, Tree};
use crate::domain::rounding::round_to;

/// Minutes to inspect a mature, mid-sized, healthy tree.
pub const BASE_TREE_MINUTES: f64 = 5.0;

/// Trees taller than this take longer to inspect.
pub const TALL_TREE_METERS: f64 = 4.0;
/// Trees shorter than this are quicker to inspect.
pub const SHORT_TREE_METERS: f64 = 2.0;

pub fn age_multiplier(group: AgeGroup) -> f64 {
    match group {
        AgeGroup::Young => 0.7,
        AgeGroup::Juvenile => 0.9,
        AgeGroup::Mature => 1.0,
        AgeGroup::Old => 1.2,
    }
}

/// Height band multiplier. The tall band is checked first.
pub fn size_multiplier(height_meters: Option<f64>) -> f64 {
    match height_meters {
        Some(h) if h > TALL_TREE_METERS => 1.3,
        Some(h) if h < SHORT_TREE_METERS => 0.8,
        _ => 1.0,
    }
}

pub fn health_multiplier(health: HealthStatus) -> f64 {
    match health {
        HealthStatus::Excellent => 0.8,
        HealthStatus::Good => 1.0,
        HealthStatus::Fair => 1.3,
        HealthStatus::Poor => 1.5,
        HealthStatus::Unknown => 1.0,
    }
}

/// Expected inspection duration for one tree, in minutes (1 decimal).
pub fn estimate_tree_minutes(tree: &Tree) -> f64 {
    let minutes = BASE_TREE_MINUTES
        * age_multiplier(tree.age_group())
        * size_multiplier(tree.height_meters)
        * health_multiplier(tree.health_status);
    round_to(minutes, 1)
}
