//! Stop placement along the route.
//!
//! The scheduler owns the clock; this module owns the mileage side: where the
//! pickup and dropoff are, which leg is active, when the next fuel stop is due,
//! and how each stop is labeled. All stop events are emitted from inside the
//! scheduler loop so segments and stops never disagree.

use crate::defaults::EPSILON;
use crate::types::{RouteLeg, RouteProfile, StopEvent, StopType};

/// A mile marker the scheduler must not drive past without stopping.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub mile: f64,
    /// `None` for an intermediate leg end that only changes the active label
    pub stop: Option<StopType>,
    pub place: String,
}

#[derive(Debug, Clone)]
pub struct StopPlanner<'a> {
    route: &'a RouteProfile,
    /// Cumulative mile at which each leg ends
    leg_ends: Vec<f64>,
    waypoints: Vec<Waypoint>,
    next_waypoint: usize,
    fuel_interval_miles: f64,
    next_fuel_mile: f64,
}

impl<'a> StopPlanner<'a> {
    /// Expects a validated route (at least one leg).
    pub fn new(route: &'a RouteProfile, fuel_interval_miles: f64) -> Self {
        let total = route.total_distance_miles;
        let mut leg_ends = Vec::with_capacity(route.legs.len());
        let mut acc = 0.0;
        for leg in &route.legs {
            acc += leg.distance_miles;
            leg_ends.push(acc.min(total));
        }
        if let Some(last) = leg_ends.last_mut() {
            *last = total;
        }

        let mut waypoints = Vec::with_capacity(route.legs.len() + 1);
        match route.legs.as_slice() {
            [] => {}
            [only] => {
                // Single leg: the load is picked up where the driver starts.
                waypoints.push(Waypoint {
                    mile: 0.0,
                    stop: Some(StopType::Pickup),
                    place: only.from_label.clone(),
                });
            }
            [first, middle @ .., _] => {
                waypoints.push(Waypoint {
                    mile: leg_ends[0],
                    stop: Some(StopType::Pickup),
                    place: first.to_label.clone(),
                });
                for (i, leg) in middle.iter().enumerate() {
                    waypoints.push(Waypoint {
                        mile: leg_ends[i + 1],
                        stop: None,
                        place: leg.to_label.clone(),
                    });
                }
            }
        }
        if let Some(last) = route.legs.last() {
            waypoints.push(Waypoint {
                mile: total,
                stop: Some(StopType::Dropoff),
                place: last.to_label.clone(),
            });
        }

        Self {
            route,
            leg_ends,
            waypoints,
            next_waypoint: 0,
            fuel_interval_miles,
            next_fuel_mile: fuel_interval_miles,
        }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Waypoint reached at `miles` and not yet served.
    pub fn due_waypoint(&self, miles: f64) -> Option<&Waypoint> {
        self.waypoints
            .get(self.next_waypoint)
            .filter(|wp| wp.mile <= miles + EPSILON)
    }

    pub fn complete_waypoint(&mut self) {
        self.next_waypoint += 1;
    }

    pub fn next_waypoint_mile(&self) -> Option<f64> {
        self.waypoints.get(self.next_waypoint).map(|wp| wp.mile)
    }

    /// Fuel boundaries strictly inside the trip; none at the destination.
    pub fn next_fuel_mile(&self) -> Option<f64> {
        (self.next_fuel_mile < self.route.total_distance_miles - EPSILON)
            .then_some(self.next_fuel_mile)
    }

    pub fn fuel_due(&self, miles: f64) -> bool {
        self.next_fuel_mile()
            .is_some_and(|mile| mile <= miles + EPSILON)
    }

    pub fn complete_fuel(&mut self) {
        self.next_fuel_mile += self.fuel_interval_miles;
    }

    /// Nearest mile the next drive must stop at.
    pub fn next_stop_mile(&self) -> f64 {
        let mut limit = self.route.total_distance_miles;
        if let Some(mile) = self.next_waypoint_mile() {
            limit = limit.min(mile);
        }
        if let Some(mile) = self.next_fuel_mile() {
            limit = limit.min(mile);
        }
        limit
    }

    /// Leg being driven at `miles`; at a boundary the following leg is active.
    fn active_leg(&self, miles: f64) -> (usize, &RouteLeg) {
        let idx = self
            .leg_ends
            .iter()
            .position(|end| *end > miles + EPSILON)
            .unwrap_or(self.route.legs.len().saturating_sub(1));
        (idx, &self.route.legs[idx])
    }

    pub fn driving_label(&self, miles: f64) -> String {
        let (_, leg) = self.active_leg(miles);
        format!("En route to {}", leg.to_label)
    }

    /// "N mi from X", measured from the start of the active leg.
    pub fn location_at(&self, miles: f64) -> String {
        let (idx, leg) = self.active_leg(miles);
        let leg_start = if idx == 0 { 0.0 } else { self.leg_ends[idx - 1] };
        let into_leg = (miles - leg_start).max(0.0);
        format!("{} mi from {}", into_leg.round() as i64, leg.from_label)
    }

    pub fn destination(&self) -> &str {
        self.route
            .legs
            .last()
            .map(|leg| leg.to_label.as_str())
            .unwrap_or_default()
    }
}

/// Label of a stop event and of the duty segment covering it.
pub fn stop_label(stop_type: StopType, place: &str) -> String {
    match stop_type {
        StopType::Pickup => format!("Pickup at {}", place),
        StopType::Dropoff => format!("Delivery at {}", place),
        StopType::Fuel => "Fuel stop".to_string(),
        StopType::Break => "30-min break".to_string(),
        StopType::Rest => "Overnight rest".to_string(),
    }
}

/// Remark line for the daily log.
pub fn stop_remark(stop: &StopEvent) -> String {
    match stop.stop_type {
        StopType::Pickup => format!("Pickup: {}", stop.location),
        StopType::Dropoff => format!("Delivery: {}", stop.location),
        StopType::Fuel => format!("Fueling ({})", stop.location),
        StopType::Break => "30-minute break".to_string(),
        StopType::Rest => format!("10-hour rest period ({})", stop.location),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RouteLeg;

    fn chicago_denver_phoenix() -> RouteProfile {
        RouteProfile::two_leg("Chicago, IL", "Denver, CO", "Phoenix, AZ", 1000.0, 820.0)
    }

    #[test]
    fn test_two_leg_waypoints() {
        let route = chicago_denver_phoenix();
        let planner = StopPlanner::new(&route, 1000.0);
        let wps = planner.waypoints();
        assert_eq!(wps.len(), 2);
        assert_eq!(wps[0].stop, Some(StopType::Pickup));
        assert_eq!(wps[0].mile, 1000.0);
        assert_eq!(wps[0].place, "Denver, CO");
        assert_eq!(wps[1].stop, Some(StopType::Dropoff));
        assert_eq!(wps[1].mile, 1820.0);
    }

    #[test]
    fn test_single_leg_picks_up_at_start() {
        let route = RouteProfile::new(300.0, vec![RouteLeg::new("Dallas, TX", "Houston, TX", 300.0)]);
        let planner = StopPlanner::new(&route, 1000.0);
        let due = planner.due_waypoint(0.0).unwrap();
        assert_eq!(due.stop, Some(StopType::Pickup));
        assert_eq!(due.place, "Dallas, TX");
    }

    #[test]
    fn test_intermediate_leg_end_is_plain_waypoint() {
        let route = RouteProfile::new(
            300.0,
            vec![
                RouteLeg::new("A", "B", 100.0),
                RouteLeg::new("B", "C", 100.0),
                RouteLeg::new("C", "D", 100.0),
            ],
        );
        let planner = StopPlanner::new(&route, 1000.0);
        let stops: Vec<_> = planner.waypoints().iter().map(|w| w.stop).collect();
        assert_eq!(stops, vec![Some(StopType::Pickup), None, Some(StopType::Dropoff)]);
        assert_eq!(planner.waypoints()[1].mile, 200.0);
    }

    #[test]
    fn test_fuel_boundary_skipped_at_destination() {
        let route = RouteProfile::two_leg("A", "B", "C", 500.0, 500.0);
        let planner = StopPlanner::new(&route, 1000.0);
        assert_eq!(planner.next_fuel_mile(), None);
        assert!(!planner.fuel_due(1000.0));
    }

    #[test]
    fn test_fuel_boundaries_advance() {
        let route = RouteProfile::two_leg("A", "B", "C", 100.0, 2400.0);
        let mut planner = StopPlanner::new(&route, 1000.0);
        assert_eq!(planner.next_fuel_mile(), Some(1000.0));
        assert!(planner.fuel_due(1000.0));
        planner.complete_fuel();
        assert_eq!(planner.next_fuel_mile(), Some(2000.0));
        planner.complete_fuel();
        assert_eq!(planner.next_fuel_mile(), None);
    }

    #[test]
    fn test_next_stop_mile_takes_nearest() {
        let route = RouteProfile::two_leg("A", "B", "C", 1200.0, 300.0);
        let mut planner = StopPlanner::new(&route, 1000.0);
        assert_eq!(planner.next_stop_mile(), 1000.0);
        planner.complete_fuel();
        assert_eq!(planner.next_stop_mile(), 1200.0);
    }

    #[test]
    fn test_labels_follow_active_leg() {
        let route = chicago_denver_phoenix();
        let planner = StopPlanner::new(&route, 1000.0);
        assert_eq!(planner.driving_label(0.0), "En route to Denver, CO");
        assert_eq!(planner.driving_label(1000.0), "En route to Phoenix, AZ");
        assert_eq!(planner.location_at(250.4), "250 mi from Chicago, IL");
        assert_eq!(planner.location_at(1300.0), "300 mi from Denver, CO");
        assert_eq!(planner.destination(), "Phoenix, AZ");
    }

    #[test]
    fn test_stop_labels() {
        assert_eq!(stop_label(StopType::Pickup, "Denver, CO"), "Pickup at Denver, CO");
        assert_eq!(stop_label(StopType::Dropoff, "Phoenix, AZ"), "Delivery at Phoenix, AZ");
        assert_eq!(stop_label(StopType::Fuel, "ignored"), "Fuel stop");
        assert_eq!(stop_label(StopType::Break, ""), "30-min break");
        assert_eq!(stop_label(StopType::Rest, ""), "Overnight rest");
    }
}
