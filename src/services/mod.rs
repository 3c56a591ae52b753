//! Business logic services

pub mod log_assembler;
pub mod planner;
pub mod projection;
pub mod rules;
pub mod scheduler;
pub mod stop_planner;
pub mod validation;
