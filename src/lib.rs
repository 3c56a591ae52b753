//! HOS trip planner: turns a routed trip into a compliant duty timeline,
//! stop list and per-day ELD logs.

pub mod config;
pub mod defaults;
pub mod error;
pub mod handlers;
pub mod services;
pub mod types;

pub use error::PlanError;
pub use services::planner::TripPlanner;
pub use services::rules::HosRules;
