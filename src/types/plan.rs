//! Trip plan output types

use serde::{Deserialize, Serialize};

use super::{DailyLog, StopType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningType {
    /// The trip pushes the driver past the 70-hour cycle
    CycleLimitExceeded,
}

/// Non-fatal finding attached to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanWarning {
    pub warning_type: WarningType,
    pub message: String,
    /// Timeline offset where the condition first occurs
    #[serde(default)]
    pub offset_hours: Option<f64>,
}

/// Trip-level totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub total_distance_miles: f64,
    pub total_driving_hours: f64,
    /// Driving time as "H:MM"
    pub total_driving_display: String,
    pub total_on_duty_hours: f64,
    pub estimated_days: u32,
    pub trip_end_offset_hours: f64,
    pub cycle_hours_used_at_end: f64,
    pub cycle_hours_remaining: f64,
}

/// Stop as presented to consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopView {
    pub stop_type: StopType,
    pub label: String,
    pub location: String,
    pub mile_marker: f64,
    pub duration_hours: f64,
    pub time_offset_hours: f64,
    pub day_number: u32,
    /// Local clock time "HH:MM" on `day_number`
    pub clock_time: String,
}

/// Complete planning result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub summary: TripSummary,
    pub daily_logs: Vec<DailyLog>,
    pub stops: Vec<StopView>,
    pub warnings: Vec<PlanWarning>,
}
