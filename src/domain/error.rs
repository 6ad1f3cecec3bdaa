//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error(
        "invalid configuration: surveillance frequency must be greater than 0 days \
         (got {frequency_days})"
    )]
    InvalidConfiguration { frequency_days: u32 },

    #[error("invalid area for location '{location}': {area_hectares} ha (must be greater than 0)")]
    InvalidAreaValue {
        location: String,
        area_hectares: f64,
    },

    #[error("invalid time range: end {end} must be after start {start}")]
    InvalidTimeRange { start: String, end: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
