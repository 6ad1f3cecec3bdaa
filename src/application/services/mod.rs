//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (InventoryRepository, FileSystem)
//! but are themselves concrete structs, not traits.

mod estimate;
mod inventory;

pub use estimate::{EstimateService, LocationPlan, SessionPlan, SessionReview};
pub use inventory::{GrowerSummary, InventoryIssue, InventoryService};
