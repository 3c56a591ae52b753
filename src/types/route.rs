//! Route and trip input types

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::defaults::DEFAULT_AVERAGE_SPEED_MPH;

/// Route as delivered by the routing collaborator (current → pickup → dropoff).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteProfile {
    #[serde(alias = "totalDistance")]
    pub total_distance_miles: f64,
    pub legs: Vec<RouteLeg>,
    #[serde(default = "default_average_speed", alias = "avgSpeed")]
    pub average_speed_mph: f64,
}

fn default_average_speed() -> f64 {
    DEFAULT_AVERAGE_SPEED_MPH
}

impl RouteProfile {
    /// Route with the default average speed.
    pub fn new(total_distance_miles: f64, legs: Vec<RouteLeg>) -> Self {
        Self {
            total_distance_miles,
            legs,
            average_speed_mph: DEFAULT_AVERAGE_SPEED_MPH,
        }
    }

    /// Convenience for the usual two-leg trip: current → pickup → dropoff.
    pub fn two_leg(
        current: &str,
        pickup: &str,
        dropoff: &str,
        to_pickup_miles: f64,
        to_dropoff_miles: f64,
    ) -> Self {
        Self::new(
            to_pickup_miles + to_dropoff_miles,
            vec![
                RouteLeg::new(current, pickup, to_pickup_miles),
                RouteLeg::new(pickup, dropoff, to_dropoff_miles),
            ],
        )
    }

    pub fn with_speed(mut self, average_speed_mph: f64) -> Self {
        self.average_speed_mph = average_speed_mph;
        self
    }

    pub fn leg_distance_sum(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_miles).sum()
    }

    /// Pure driving time for the whole route in hours.
    pub fn driving_hours(&self) -> f64 {
        self.total_distance_miles / self.average_speed_mph
    }
}

/// One leg of the route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    #[serde(alias = "from")]
    pub from_label: String,
    #[serde(alias = "to")]
    pub to_label: String,
    #[serde(alias = "distance")]
    pub distance_miles: f64,
}

impl RouteLeg {
    pub fn new(from: &str, to: &str, distance_miles: f64) -> Self {
        Self {
            from_label: from.to_string(),
            to_label: to.to_string(),
            distance_miles,
        }
    }
}

/// Driver state at trip start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripContext {
    #[serde(alias = "currentCycleUsed")]
    pub cycle_hours_used_at_start: f64,
    /// Local date-time the driver goes on duty. Offset 0 of the timeline is
    /// midnight of this date.
    #[serde(alias = "startDate")]
    pub start_timestamp: NaiveDateTime,
}

impl TripContext {
    pub fn new(cycle_hours_used_at_start: f64, start_timestamp: NaiveDateTime) -> Self {
        Self {
            cycle_hours_used_at_start,
            start_timestamp,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_timestamp.date()
    }

    /// Hours between midnight and the start of duty.
    pub fn start_hour(&self) -> f64 {
        self.start_timestamp.num_seconds_from_midnight() as f64 / 3600.0
    }
}

/// Plan request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlanRequest {
    pub route: RouteProfile,
    pub trip: TripContext,
}
