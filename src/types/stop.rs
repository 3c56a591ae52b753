//! Stop event types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopType {
    Pickup,
    Dropoff,
    Fuel,
    Break,
    Rest,
}

impl StopType {
    pub const fn as_str(self) -> &'static str {
        match self {
            StopType::Pickup => "pickup",
            StopType::Dropoff => "dropoff",
            StopType::Fuel => "fuel",
            StopType::Break => "break",
            StopType::Rest => "rest",
        }
    }
}

/// A stop along the route, emitted alongside the duty segment that covers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopEvent {
    pub stop_type: StopType,
    pub mile_marker: f64,
    pub duration_hours: f64,
    pub time_offset_hours: f64,
    pub label: String,
    /// Place name for pickup/dropoff, "N mi from X" otherwise
    pub location: String,
}

impl StopEvent {
    pub fn end_offset_hours(&self) -> f64 {
        self.time_offset_hours + self.duration_hours
    }
}
