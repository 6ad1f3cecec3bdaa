//! Inventory service
//!
//! Data-quality checks over a grower's inventory and read access to the
//! pest and disease catalogue.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{assess_inspection_risk, GpsCoordinates, RiskLevel, Threat};
use crate::infrastructure::traits::InventoryRepository;

/// One line of the grower listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowerSummary {
    pub id: String,
    /// Farm name, or the id when none is recorded.
    pub name: String,
    pub tree_count: usize,
}

/// A data problem that affects estimates or reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InventoryIssue {
    ZeroFrequency,
    InvalidArea { location: String, area_hectares: f64 },
    LatitudeOutOfRange { location: String, latitude: f64 },
    LongitudeOutOfRange { location: String, longitude: f64 },
    IncompleteGps { location: String },
    DuplicateTreeId { location: String, tree_id: String },
}

impl std::fmt::Display for InventoryIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryIssue::ZeroFrequency => {
                write!(f, "surveillance frequency must be greater than 0 days")
            }
            InventoryIssue::InvalidArea {
                location,
                area_hectares,
            } => write!(
                f,
                "{location}: area {area_hectares} ha must be greater than 0 (stocking rate ignored)"
            ),
            InventoryIssue::LatitudeOutOfRange { location, latitude } => {
                write!(f, "{location}: latitude {latitude} seems outside Australia")
            }
            InventoryIssue::LongitudeOutOfRange {
                location,
                longitude,
            } => write!(f, "{location}: longitude {longitude} seems outside Australia"),
            InventoryIssue::IncompleteGps { location } => write!(
                f,
                "{location}: provide both latitude and longitude or neither"
            ),
            InventoryIssue::DuplicateTreeId { location, tree_id } => {
                write!(f, "{location}: tree id {tree_id} is already used")
            }
        }
    }
}

fn gps_issues(location: &str, gps: &GpsCoordinates) -> Vec<InventoryIssue> {
    let mut issues = Vec::new();
    if !gps.is_complete() && (gps.latitude.is_some() || gps.longitude.is_some()) {
        issues.push(InventoryIssue::IncompleteGps {
            location: location.to_string(),
        });
    }
    if let (Some(latitude), false) = (gps.latitude, gps.latitude_in_range()) {
        issues.push(InventoryIssue::LatitudeOutOfRange {
            location: location.to_string(),
            latitude,
        });
    }
    if let (Some(longitude), false) = (gps.longitude, gps.longitude_in_range()) {
        issues.push(InventoryIssue::LongitudeOutOfRange {
            location: location.to_string(),
            longitude,
        });
    }
    issues
}

/// Service for inventory checks and the threat catalogue.
pub struct InventoryService {
    repository: Arc<dyn InventoryRepository>,
}

impl InventoryService {
    pub fn new(repository: Arc<dyn InventoryRepository>) -> Self {
        Self { repository }
    }

    /// Report data problems for a grower. Empty when the inventory is clean.
    #[instrument(skip(self))]
    pub fn check(&self, grower_id: &str) -> ApplicationResult<Vec<InventoryIssue>> {
        let grower = self
            .repository
            .grower(grower_id)?
            .ok_or_else(|| ApplicationError::GrowerNotFound(grower_id.to_string()))?;

        let mut issues = Vec::new();
        if grower.surveillance_frequency_days == 0 {
            issues.push(InventoryIssue::ZeroFrequency);
        }

        // tree ids are unique across the whole inventory, not per location
        let mut seen = HashSet::new();
        for location in &grower.locations {
            if let Some(area) = location.area_hectares.filter(|a| a.is_nan() || *a <= 0.0) {
                issues.push(InventoryIssue::InvalidArea {
                    location: location.name.clone(),
                    area_hectares: area,
                });
            }
            if let Some(gps) = &location.gps {
                issues.extend(gps_issues(&location.name, gps));
            }
            for tree in &location.trees {
                if !seen.insert(tree.tree_id.as_str()) {
                    issues.push(InventoryIssue::DuplicateTreeId {
                        location: location.name.clone(),
                        tree_id: tree.tree_id.clone(),
                    });
                }
            }
        }
        debug!("check: grower={} issues={}", grower_id, issues.len());
        Ok(issues)
    }

    /// Growers with their tree counts, in inventory order.
    pub fn growers(&self) -> ApplicationResult<Vec<GrowerSummary>> {
        let mut summaries = Vec::new();
        for id in self.repository.grower_ids()? {
            if let Some(grower) = self.repository.grower(&id)? {
                summaries.push(GrowerSummary {
                    name: grower.display_name().to_string(),
                    tree_count: grower.tree_count(),
                    id,
                });
            }
        }
        Ok(summaries)
    }

    pub fn threats(&self) -> ApplicationResult<Vec<Threat>> {
        self.repository.threats()
    }

    /// Find a catalogue threat by slug or case-insensitive name.
    pub fn find_threat(&self, key: &str) -> ApplicationResult<Threat> {
        self.threats()?
            .into_iter()
            .find(|t| t.slug() == key || t.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| ApplicationError::ThreatNotFound(key.to_string()))
    }

    /// Risk of an inspection linked to a catalogue threat and/or legacy
    /// pest and disease findings.
    pub fn assess_risk(
        &self,
        threat: Option<&str>,
        pest: Option<RiskLevel>,
        disease: Option<RiskLevel>,
    ) -> ApplicationResult<RiskLevel> {
        let threat_level = threat
            .map(|key| self.find_threat(key).map(|t| t.risk_level))
            .transpose()?;
        Ok(assess_inspection_risk(threat_level, pest, disease))
    }
}
