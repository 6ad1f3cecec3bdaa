//! Surveillance plans: effort for a chosen set of locations and the
//! per-tree inspection list for a session.

use serde::Serialize;

use crate::domain::entities::{AgeGroup, HealthStatus, Location, Variety};
use crate::domain::rounding::round_to;
use crate::domain::tree_time::estimate_tree_minutes;

/// Travel, setup and documentation allowance applied to plan totals.
pub const PLAN_OVERHEAD_FACTOR: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEffort {
    pub tree_count: usize,
    pub total_hours: f64,
    /// Average before overhead.
    pub average_minutes_per_tree: f64,
}

/// Effort for a plan covering `locations`; `None` when none has trees.
pub fn plan_effort<'a>(locations: impl IntoIterator<Item = &'a Location>) -> Option<PlanEffort> {
    let (minutes, tree_count) = locations
        .into_iter()
        .flat_map(|l| l.trees.iter())
        .fold((0.0, 0usize), |(sum, n), tree| (sum + estimate_tree_minutes(tree), n + 1));

    if tree_count == 0 {
        return None;
    }

    let with_overhead = minutes * (1.0 + PLAN_OVERHEAD_FACTOR);
    Some(PlanEffort {
        tree_count,
        total_hours: round_to(with_overhead / 60.0, 2),
        average_minutes_per_tree: round_to(minutes / tree_count as f64, 1),
    })
}

/// One tree to inspect during a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedInspection {
    pub tree_id: String,
    pub variety: Variety,
    pub age_group: AgeGroup,
    pub health_status: HealthStatus,
    pub minutes: f64,
}

/// Inspection list for every tree at `location`, in inventory order.
pub fn plan_tree_inspections(location: &Location) -> Vec<PlannedInspection> {
    location
        .trees
        .iter()
        .map(|tree| PlannedInspection {
            tree_id: tree.tree_id.clone(),
            variety: tree.variety,
            age_group: tree.age_group(),
            health_status: tree.health_status,
            minutes: estimate_tree_minutes(tree),
        })
        .collect()
}
