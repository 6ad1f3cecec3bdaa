//! Surveillance estimate service
//!
//! Loads a grower snapshot from the inventory repository and runs the
//! effort rules over it. Nothing is cached between calls.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    classify_stocking_rate, estimate_farm_effort, estimate_location_minutes, plan_effort,
    plan_tree_inspections, CalculationMode, EffortOutcome, Grower, Location, PlanEffort,
    PlannedInspection, SessionTimes, StockingClassification,
};
use crate::infrastructure::traits::InventoryRepository;

/// Inspection list and effort for one session across selected locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionPlan {
    pub grower_id: String,
    pub effort: Option<PlanEffort>,
    pub locations: Vec<LocationPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationPlan {
    pub location_name: String,
    pub inspections: Vec<PlannedInspection>,
}

/// Recorded session time compared with the estimate for that location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReview {
    pub location_name: String,
    pub actual_minutes: i64,
    /// `None` when the location has no trees.
    pub expected_minutes: Option<f64>,
}

impl SessionReview {
    /// Actual minus expected; positive when the session ran long.
    pub fn variance_minutes(&self) -> Option<f64> {
        self.expected_minutes
            .map(|expected| self.actual_minutes as f64 - expected)
    }
}

/// Service computing surveillance estimates from the inventory.
pub struct EstimateService {
    repository: Arc<dyn InventoryRepository>,
    mode: CalculationMode,
    frequency_override: Option<u32>,
}

impl EstimateService {
    /// Create a new estimate service using detailed per-tree calculation.
    pub fn new(repository: Arc<dyn InventoryRepository>) -> Self {
        Self {
            repository,
            mode: CalculationMode::Detailed,
            frequency_override: None,
        }
    }

    pub fn with_mode(mut self, mode: CalculationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the grower's configured surveillance frequency.
    pub fn with_frequency_override(mut self, frequency_days: Option<u32>) -> Self {
        self.frequency_override = frequency_days;
        self
    }

    pub fn mode(&self) -> CalculationMode {
        self.mode
    }

    fn load_grower(&self, grower_id: &str) -> ApplicationResult<Grower> {
        self.repository
            .grower(grower_id)?
            .ok_or_else(|| ApplicationError::GrowerNotFound(grower_id.to_string()))
    }

    fn find_location<'a>(grower: &'a Grower, name: &str) -> ApplicationResult<&'a Location> {
        grower
            .locations
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| ApplicationError::LocationNotFound {
                grower: grower.id.clone(),
                location: name.to_string(),
            })
    }

    /// Estimate the surveillance effort for a grower.
    ///
    /// Returns `EffortOutcome::NoData` when the grower has no trees.
    #[instrument(skip(self))]
    pub fn compute_surveillance_estimate(
        &self,
        grower_id: &str,
    ) -> ApplicationResult<EffortOutcome> {
        let mut grower = self.load_grower(grower_id)?;
        if let Some(days) = self.frequency_override {
            debug!(
                "frequency override: {} -> {} days",
                grower.surveillance_frequency_days, days
            );
            grower.surveillance_frequency_days = days;
        }
        let outcome = estimate_farm_effort(&grower, &grower.locations, self.mode)?;
        debug!(
            "estimate: grower={} trees={} mode={}",
            grower_id,
            grower.tree_count(),
            self.mode
        );
        Ok(outcome)
    }

    /// Density classification for every location that has one.
    #[instrument(skip(self))]
    pub fn stocking_report(
        &self,
        grower_id: &str,
    ) -> ApplicationResult<Vec<StockingClassification>> {
        let grower = self.load_grower(grower_id)?;
        Ok(grower
            .locations
            .iter()
            .filter_map(classify_stocking_rate)
            .collect())
    }

    /// Tree inspection list for a session.
    ///
    /// An empty `location_names` selects every location of the grower.
    #[instrument(skip(self))]
    pub fn plan_session(
        &self,
        grower_id: &str,
        location_names: &[String],
    ) -> ApplicationResult<SessionPlan> {
        let grower = self.load_grower(grower_id)?;
        let selected: Vec<&Location> = if location_names.is_empty() {
            grower.locations.iter().collect()
        } else {
            location_names
                .iter()
                .map(|name| Self::find_location(&grower, name))
                .collect::<ApplicationResult<_>>()?
        };

        Ok(SessionPlan {
            grower_id: grower.id.clone(),
            effort: plan_effort(selected.iter().copied()),
            locations: selected
                .iter()
                .map(|location| LocationPlan {
                    location_name: location.name.clone(),
                    inspections: plan_tree_inspections(location),
                })
                .collect(),
        })
    }

    /// Compare a recorded session with the location's adjusted estimate.
    #[instrument(skip(self))]
    pub fn review_session(
        &self,
        grower_id: &str,
        location_name: &str,
        times: SessionTimes,
    ) -> ApplicationResult<SessionReview> {
        let grower = self.load_grower(grower_id)?;
        let location = Self::find_location(&grower, location_name)?;
        Ok(SessionReview {
            location_name: location.name.clone(),
            actual_minutes: times.actual_minutes(),
            expected_minutes: estimate_location_minutes(location, self.mode)
                .map(|effort| effort.adjusted_minutes),
        })
    }
}
