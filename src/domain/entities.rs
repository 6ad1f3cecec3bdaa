//! Domain entities: inventory snapshots read by the estimator

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Surveillance interval used when a grower has not configured one.
pub const DEFAULT_FREQUENCY_DAYS: u32 = 14;

/// Mango cultivar grown on the farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variety {
    #[default]
    KensingtonPride,
    Calypso,
    HoneyGold,
    R2e2,
    Keitt,
    Kent,
    #[serde(other)]
    Other,
}

impl Variety {
    pub fn label(&self) -> &'static str {
        match self {
            Variety::KensingtonPride => "Kensington Pride",
            Variety::Calypso => "Calypso",
            Variety::HoneyGold => "Honey Gold",
            Variety::R2e2 => "R2E2",
            Variety::Keitt => "Keitt",
            Variety::Kent => "Kent",
            Variety::Other => "Other",
        }
    }
}

/// Observed health of a tree.
///
/// Tags that are not recognised deserialize to `Unknown`, which the time
/// model treats as neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Excellent,
    #[default]
    Good,
    Fair,
    Poor,
    #[serde(other)]
    Unknown,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Fair => "Fair",
            HealthStatus::Poor => "Poor",
            HealthStatus::Unknown => "Unknown",
        }
    }
}

/// Age bucket derived from a tree's age in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    /// 0-3 years
    Young,
    /// 4-7 years
    Juvenile,
    /// 8-15 years
    Mature,
    /// 16+ years
    Old,
}

impl AgeGroup {
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=3 => AgeGroup::Young,
            4..=7 => AgeGroup::Juvenile,
            8..=15 => AgeGroup::Mature,
            _ => AgeGroup::Old,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Young => "0-3 years",
            AgeGroup::Juvenile => "4-7 years",
            AgeGroup::Mature => "8-15 years",
            AgeGroup::Old => "16+ years",
        }
    }
}

/// A single mango tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub tree_id: String,
    /// Age in years; the age group is always derived from this.
    pub age: u32,
    #[serde(default)]
    pub variety: Variety,
    #[serde(default)]
    pub height_meters: Option<f64>,
    #[serde(default)]
    pub canopy_diameter_meters: Option<f64>,
    #[serde(default)]
    pub health_status: HealthStatus,
}

impl Tree {
    pub fn new(tree_id: impl Into<String>, age: u32) -> Self {
        Self {
            tree_id: tree_id.into(),
            age,
            variety: Variety::default(),
            height_meters: None,
            canopy_diameter_meters: None,
            health_status: HealthStatus::default(),
        }
    }

    pub fn with_height(mut self, meters: f64) -> Self {
        self.height_meters = Some(meters);
        self
    }

    pub fn with_canopy(mut self, meters: f64) -> Self {
        self.canopy_diameter_meters = Some(meters);
        self
    }

    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.health_status = health;
        self
    }

    pub fn with_variety(mut self, variety: Variety) -> Self {
        self.variety = variety;
        self
    }

    pub fn age_group(&self) -> AgeGroup {
        AgeGroup::from_age(self.age)
    }
}

/// GPS position of a location.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GpsCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GpsCoordinates {
    /// Rough bounding box for Australian orchards.
    pub const LATITUDE_RANGE: (f64, f64) = (-44.0, -10.0);
    pub const LONGITUDE_RANGE: (f64, f64) = (113.0, 154.0);

    pub fn is_complete(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    pub fn latitude_in_range(&self) -> bool {
        self.latitude.map_or(true, |lat| {
            (Self::LATITUDE_RANGE.0..=Self::LATITUDE_RANGE.1).contains(&lat)
        })
    }

    pub fn longitude_in_range(&self) -> bool {
        self.longitude.map_or(true, |lon| {
            (Self::LONGITUDE_RANGE.0..=Self::LONGITUDE_RANGE.1).contains(&lon)
        })
    }
}

/// A block, paddock or orchard owned by a grower.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub area_hectares: Option<f64>,
    #[serde(default)]
    pub gps: Option<GpsCoordinates>,
    #[serde(default)]
    pub soil_type: Option<String>,
    #[serde(default)]
    pub irrigation_type: Option<String>,
    #[serde(default)]
    pub trees: Vec<Tree>,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_area(mut self, hectares: f64) -> Self {
        self.area_hectares = Some(hectares);
        self
    }

    pub fn with_trees(mut self, trees: impl IntoIterator<Item = Tree>) -> Self {
        self.trees.extend(trees);
        self
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Trees per hectare.
    ///
    /// `Ok(None)` when no area is recorded, `Err(InvalidAreaValue)` when the
    /// recorded area is not positive.
    pub fn stocking_rate(&self) -> DomainResult<Option<f64>> {
        match self.area_hectares {
            None => Ok(None),
            Some(area) if area > 0.0 => Ok(Some(self.trees.len() as f64 / area)),
            Some(area) => Err(DomainError::InvalidAreaValue {
                location: self.name.clone(),
                area_hectares: area,
            }),
        }
    }
}

fn default_frequency_days() -> u32 {
    DEFAULT_FREQUENCY_DAYS
}

/// Farm operator owning locations and trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grower {
    pub id: String,
    #[serde(default)]
    pub farm_name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default = "default_frequency_days")]
    pub surveillance_frequency_days: u32,
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl Grower {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            farm_name: None,
            region: None,
            contact_number: None,
            surveillance_frequency_days: DEFAULT_FREQUENCY_DAYS,
            locations: Vec::new(),
        }
    }

    pub fn with_frequency(mut self, days: u32) -> Self {
        self.surveillance_frequency_days = days;
        self
    }

    pub fn with_locations(mut self, locations: impl IntoIterator<Item = Location>) -> Self {
        self.locations.extend(locations);
        self
    }

    pub fn tree_count(&self) -> usize {
        self.locations.iter().map(Location::tree_count).sum()
    }

    pub fn display_name(&self) -> &str {
        self.farm_name.as_deref().unwrap_or(&self.id)
    }
}
