//! Inventory repositories: a TOML file on disk and an in-memory store.
//!
//! File layout:
//! ```toml
//! [[growers]]
//! id = "grower"
//! surveillance_frequency_days = 14
//!
//! [[growers.locations]]
//! name = "Block A"
//! area_hectares = 2.0
//!
//! [[growers.locations.trees]]
//! tree_id = "MANGO-0001"
//! age = 5
//! health_status = "good"
//!
//! [[threats]]
//! name = "Fruit Fly"
//! threat_type = "pest"
//! risk_level = "high"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Grower, Threat};
use crate::infrastructure::traits::{FileSystem, InventoryRepository};

/// On-disk inventory document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryDocument {
    pub growers: Vec<Grower>,
    pub threats: Vec<Threat>,
}

impl InventoryDocument {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Repository backed by a TOML inventory file.
///
/// The file is re-read on every call so each request sees the current state.
pub struct TomlInventoryRepository {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl TomlInventoryRepository {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ApplicationResult<InventoryDocument> {
        debug!("load: inventory={}", self.path.display());
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read inventory", &self.path)?;
        InventoryDocument::parse(&content).map_err(|e| ApplicationError::OperationFailed {
            context: format!("parse inventory {}", self.path.display()),
            source: Box::new(e),
        })
    }
}

impl InventoryRepository for TomlInventoryRepository {
    fn grower(&self, grower_id: &str) -> ApplicationResult<Option<Grower>> {
        Ok(self
            .load()?
            .growers
            .into_iter()
            .find(|g| g.id == grower_id))
    }

    fn grower_ids(&self) -> ApplicationResult<Vec<String>> {
        Ok(self.load()?.growers.into_iter().map(|g| g.id).collect())
    }

    fn threats(&self) -> ApplicationResult<Vec<Threat>> {
        Ok(self.load()?.threats)
    }
}

/// Repository holding an inventory document in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryRepository {
    document: InventoryDocument,
}

impl InMemoryInventoryRepository {
    pub fn new(growers: Vec<Grower>, threats: Vec<Threat>) -> Self {
        Self {
            document: InventoryDocument { growers, threats },
        }
    }
}

impl From<InventoryDocument> for InMemoryInventoryRepository {
    fn from(document: InventoryDocument) -> Self {
        Self { document }
    }
}

impl InventoryRepository for InMemoryInventoryRepository {
    fn grower(&self, grower_id: &str) -> ApplicationResult<Option<Grower>> {
        Ok(self
            .document
            .growers
            .iter()
            .find(|g| g.id == grower_id)
            .cloned())
    }

    fn grower_ids(&self) -> ApplicationResult<Vec<String>> {
        Ok(self.document.growers.iter().map(|g| g.id.clone()).collect())
    }

    fn threats(&self) -> ApplicationResult<Vec<Threat>> {
        Ok(self.document.threats.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HealthStatus, RiskLevel, ThreatType};

    const INVENTORY: &str = r#"
[[growers]]
id = "grower"
farm_name = "Top End Mangoes"
surveillance_frequency_days = 7

[[growers.locations]]
name = "Block A"
area_hectares = 2.5
gps = { latitude = -12.45, longitude = 130.84 }

[[growers.locations.trees]]
tree_id = "MANGO-0001"
age = 5
variety = "calypso"
height_meters = 3.2
health_status = "fair"

[[growers]]
id = "neighbour"

[[threats]]
name = "Fruit Fly"
threat_type = "pest"
risk_level = "high"
"#;

    #[test]
    fn given_inventory_toml_when_parsing_then_builds_snapshot() {
        let doc = InventoryDocument::parse(INVENTORY).unwrap();

        assert_eq!(doc.growers.len(), 2);
        let grower = &doc.growers[0];
        assert_eq!(grower.surveillance_frequency_days, 7);
        assert_eq!(grower.locations[0].trees[0].health_status, HealthStatus::Fair);
        assert_eq!(doc.growers[1].surveillance_frequency_days, 14);
        assert_eq!(doc.threats[0].threat_type, ThreatType::Pest);
        assert_eq!(doc.threats[0].risk_level, RiskLevel::High);
    }

    #[test]
    fn given_in_memory_repository_when_looking_up_then_finds_by_id() {
        let repo = InMemoryInventoryRepository::from(InventoryDocument::parse(INVENTORY).unwrap());

        assert!(repo.grower("grower").unwrap().is_some());
        assert!(repo.grower("nobody").unwrap().is_none());
        assert_eq!(repo.grower_ids().unwrap(), vec!["grower", "neighbour"]);
    }
}
