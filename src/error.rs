//! Planning errors

use thiserror::Error;

/// Errors raised by the trip planner core.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanError {
    /// Malformed route profile (non-positive distance, empty legs, ...)
    #[error("Invalid route profile: {0}")]
    Configuration(String),

    /// Trip context outside the accepted range
    #[error("Invalid trip context: {0}")]
    Validation(String),

    /// The scheduler produced an inconsistent timeline
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl PlanError {
    /// Error code used in response envelopes.
    pub const fn code(&self) -> &'static str {
        match self {
            PlanError::Configuration(_) => "CONFIGURATION_ERROR",
            PlanError::Validation(_) => "VALIDATION_ERROR",
            PlanError::InternalInvariant(_) => "INTERNAL_ERROR",
        }
    }
}
