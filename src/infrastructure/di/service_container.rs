//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{EstimateService, InventoryService};
use crate::config::Settings;
use crate::infrastructure::inventory::TomlInventoryRepository;
use crate::infrastructure::traits::{FileSystem, InventoryRepository, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Grower inventory and threat catalogue
    pub repository: Arc<dyn InventoryRepository>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// The inventory is read from `settings.inventory`.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let repository = Arc::new(TomlInventoryRepository::new(fs, settings.inventory.clone()));
        Self::with_deps(settings, repository)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, repository: Arc<dyn InventoryRepository>) -> Self {
        Self {
            settings: Arc::new(settings),
            repository,
        }
    }

    /// Estimate service configured from settings.
    pub fn estimate_service(&self) -> EstimateService {
        EstimateService::new(Arc::clone(&self.repository))
            .with_mode(self.settings.mode)
            .with_frequency_override(self.settings.frequency_days)
    }

    pub fn inventory_service(&self) -> InventoryService {
        InventoryService::new(Arc::clone(&self.repository))
    }
}
