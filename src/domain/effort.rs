//! Farm effort estimator: combines all of a grower's locations into one
//! schedulable surveillance estimate.
//!
//! total = Σ location minutes + travel + documentation
//!
//! The estimate is rebuilt from the inventory snapshot on every call and
//! carries no timestamps.

use serde::Serialize;

use crate::domain::entities::{Grower, Location};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::location::{estimate_location_minutes, CalculationMode, LocationEffort};
use crate::domain::rounding::round_to;

/// Travel minutes per location when more than one location has trees.
pub const TRAVEL_MINUTES_PER_LOCATION: f64 = 10.0;
/// Travel minutes for a single-location session.
pub const SINGLE_LOCATION_TRAVEL_MINUTES: f64 = 5.0;
/// Documentation overhead as a share of location minutes.
pub const DOCUMENTATION_FACTOR: f64 = 0.15;

const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// Computed surveillance budget for one grower.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveillanceEffortEstimate {
    pub grower_id: String,
    pub mode: CalculationMode,
    pub frequency_days: u32,
    pub total_trees: usize,
    pub total_location_minutes: f64,
    pub travel_minutes: f64,
    pub documentation_minutes: f64,
    pub total_minutes: f64,
    pub total_hours: f64,
    pub monthly_effort_hours: f64,
    pub annual_sessions: u32,
    pub locations: Vec<LocationEffort>,
}

impl SurveillanceEffortEstimate {
    /// Locations whose area was recorded but not positive.
    pub fn invalid_area_locations(&self) -> impl Iterator<Item = &str> {
        self.locations
            .iter()
            .filter(|l| l.invalid_area)
            .map(|l| l.location_name.as_str())
    }

    pub fn overhead_minutes(&self) -> f64 {
        self.travel_minutes + self.documentation_minutes
    }
}

/// Result of an estimate request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EffortOutcome {
    Estimate(SurveillanceEffortEstimate),
    /// The grower has no trees in any location.
    NoData,
}

impl EffortOutcome {
    pub fn estimate(&self) -> Option<&SurveillanceEffortEstimate> {
        match self {
            EffortOutcome::Estimate(estimate) => Some(estimate),
            EffortOutcome::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, EffortOutcome::NoData)
    }
}

fn validate_frequency(frequency_days: u32) -> DomainResult<f64> {
    if frequency_days == 0 {
        return Err(DomainError::InvalidConfiguration { frequency_days });
    }
    Ok(f64::from(frequency_days))
}

/// Travel overhead for a session visiting `visited` non-empty locations.
pub fn travel_minutes(visited: usize) -> f64 {
    if visited > 1 {
        TRAVEL_MINUTES_PER_LOCATION * visited as f64
    } else {
        SINGLE_LOCATION_TRAVEL_MINUTES
    }
}

/// Scheduled sessions per year at the given interval.
pub fn annual_sessions(frequency_days: u32) -> DomainResult<u32> {
    let frequency = validate_frequency(frequency_days)?;
    Ok(round_to(DAYS_PER_YEAR / frequency, 0) as u32)
}

/// Estimate the surveillance effort for `grower` over `locations`.
///
/// Fails with `InvalidConfiguration` when the grower's frequency is zero;
/// returns `EffortOutcome::NoData` when no location has trees.
pub fn estimate_farm_effort(
    grower: &Grower,
    locations: &[Location],
    mode: CalculationMode,
) -> DomainResult<EffortOutcome> {
    let frequency = validate_frequency(grower.surveillance_frequency_days)?;

    let breakdown: Vec<LocationEffort> = locations
        .iter()
        .filter_map(|location| estimate_location_minutes(location, mode))
        .collect();

    let total_trees: usize = breakdown.iter().map(|l| l.tree_count).sum();
    if total_trees == 0 {
        return Ok(EffortOutcome::NoData);
    }

    let total_location_minutes: f64 = breakdown.iter().map(|l| l.adjusted_minutes).sum();
    let travel_minutes = travel_minutes(breakdown.len());
    let documentation_minutes = DOCUMENTATION_FACTOR * total_location_minutes;
    let total_minutes = total_location_minutes + travel_minutes + documentation_minutes;
    let total_hours = round_to(total_minutes / 60.0, 2);

    Ok(EffortOutcome::Estimate(SurveillanceEffortEstimate {
        grower_id: grower.id.clone(),
        mode,
        frequency_days: grower.surveillance_frequency_days,
        total_trees,
        total_location_minutes,
        travel_minutes,
        documentation_minutes,
        total_minutes,
        total_hours,
        monthly_effort_hours: round_to(total_hours * DAYS_PER_MONTH / frequency, 1),
        annual_sessions: annual_sessions(grower.surveillance_frequency_days)?,
        locations: breakdown,
    }))
}
