//! Domain layer: entities and surveillance effort rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! Every function here is a pure computation over inventory snapshots.

pub mod effort;
pub mod entities;
pub mod error;
pub mod location;
pub mod plan;
pub mod rounding;
pub mod session;
pub mod stocking;
pub mod threat;
pub mod tree_time;

pub use effort::{estimate_farm_effort, EffortOutcome, SurveillanceEffortEstimate};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use location::{estimate_location_minutes, CalculationMode, LocationEffort};
pub use plan::{plan_effort, plan_tree_inspections, PlanEffort, PlannedInspection};
pub use session::SessionTimes;
pub use stocking::{classify_stocking_rate, DensityBand, StockingClassification};
pub use threat::{assess_inspection_risk, RiskLevel, Threat, ThreatType};
pub use tree_time::estimate_tree_minutes;
