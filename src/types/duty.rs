//! Duty status types

use serde::{Deserialize, Serialize};

use crate::defaults::HOURS_PER_DAY;

/// ELD duty status (the four rows of a daily log grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DutyStatus {
    OffDuty,
    #[serde(rename = "sleeper")]
    SleeperBerth,
    Driving,
    OnDuty,
}

impl DutyStatus {
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDuty,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "off-duty",
            DutyStatus::SleeperBerth => "sleeper",
            DutyStatus::Driving => "driving",
            DutyStatus::OnDuty => "on-duty",
        }
    }

    /// Counts toward the 14-hour window and the cycle.
    pub const fn is_on_duty(self) -> bool {
        match self {
            DutyStatus::Driving | DutyStatus::OnDuty => true,
            DutyStatus::OffDuty | DutyStatus::SleeperBerth => false,
        }
    }
}

/// What the driver is doing during a segment. The duty status follows from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyActivity {
    /// Overnight rest before the trip begins
    HomeTerminal,
    PreTripInspection,
    Driving,
    Pickup,
    Dropoff,
    Fuel,
    /// 30-minute break
    Break,
    PostTripInspection,
    /// Off-duty fill up to the end of the day
    OffDuty,
    /// 10-hour rest in the sleeper berth
    Rest,
}

impl DutyActivity {
    pub const fn status(self) -> DutyStatus {
        match self {
            DutyActivity::HomeTerminal | DutyActivity::Rest => DutyStatus::SleeperBerth,
            DutyActivity::Break | DutyActivity::OffDuty => DutyStatus::OffDuty,
            DutyActivity::Driving => DutyStatus::Driving,
            DutyActivity::PreTripInspection
            | DutyActivity::Pickup
            | DutyActivity::Dropoff
            | DutyActivity::Fuel
            | DutyActivity::PostTripInspection => DutyStatus::OnDuty,
        }
    }
}

/// A contiguous stretch of one duty status.
///
/// Offsets are hours since midnight of the trip's first day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutySegment {
    pub status: DutyStatus,
    pub activity: DutyActivity,
    pub start_offset_hours: f64,
    pub duration_hours: f64,
    pub location_label: String,
}

impl DutySegment {
    pub fn new(
        activity: DutyActivity,
        start_offset_hours: f64,
        duration_hours: f64,
        location_label: impl Into<String>,
    ) -> Self {
        Self {
            status: activity.status(),
            activity,
            start_offset_hours,
            duration_hours,
            location_label: location_label.into(),
        }
    }

    pub fn end_offset_hours(&self) -> f64 {
        self.start_offset_hours + self.duration_hours
    }

    /// Start time within its own day (0..24).
    pub fn hour_of_day(&self) -> f64 {
        self.start_offset_hours.rem_euclid(HOURS_PER_DAY)
    }

    /// Copy of this segment restricted to `[start, end)`.
    pub fn slice(&self, start: f64, end: f64) -> Self {
        Self {
            status: self.status,
            activity: self.activity,
            start_offset_hours: start,
            duration_hours: end - start,
            location_label: self.location_label.clone(),
        }
    }
}
