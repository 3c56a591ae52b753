//! Message handlers

pub mod plan;

pub use plan::{handle_plan, handle_plan_message};
