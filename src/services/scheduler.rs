//! Duty-status scheduler.
//!
//! A single forward-only simulation walks the route and decides, step by
//! step, what the driver does next: serve a due stop, take the 10-hour rest,
//! take the 30-minute break, or drive as far as every limit allows. Each step
//! appends one duty segment (and at most one stop event), so the timeline is
//! contiguous by construction.
//!
//! Step priority:
//! 1. a pickup/dropoff waypoint or fuel boundary reached at the current mile
//! 2. the 10-hour rest once the 11-hour driving or 14-hour window is used up
//! 3. the 30-minute break after 8 hours of driving
//! 4. a drive up to the nearest limit, waypoint or fuel boundary

use tracing::{debug, warn};

use crate::defaults::{EPSILON, HOURS_PER_DAY};
use crate::error::PlanError;
use crate::services::rules::HosRules;
use crate::services::stop_planner::{stop_label, StopPlanner};
use crate::services::validation::{validate_context, validate_route};
use crate::types::{
    DutyActivity, DutySegment, DutyStatus, PlanWarning, RouteProfile, StopEvent, StopType,
    TripContext, WarningType,
};

/// Steps allowed regardless of trip size.
const BASE_STEP_BUDGET: usize = 1_000;

/// Continuous timeline produced by the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub segments: Vec<DutySegment>,
    pub stops: Vec<StopEvent>,
    pub warnings: Vec<PlanWarning>,
    pub cycle_hours_at_end: f64,
}

impl Schedule {
    pub fn trip_end_offset(&self) -> f64 {
        self.segments
            .last()
            .map(DutySegment::end_offset_hours)
            .unwrap_or(0.0)
    }

    pub fn hours_in(&self, status: DutyStatus) -> f64 {
        self.segments
            .iter()
            .filter(|s| s.status == status)
            .map(|s| s.duration_hours)
            .sum()
    }

    pub fn stops_of(&self, stop_type: StopType) -> impl Iterator<Item = &StopEvent> {
        self.stops.iter().filter(move |s| s.stop_type == stop_type)
    }
}

/// Schedule the whole trip.
pub fn schedule(
    route: &RouteProfile,
    ctx: &TripContext,
    rules: &HosRules,
) -> Result<Schedule, PlanError> {
    rules
        .validate()
        .map_err(|e| PlanError::Configuration(format!("HOS rules: {}", e)))?;
    validate_route(route)?;
    validate_context(ctx, rules)?;

    let mut sim = DutySimulation::new(route, ctx, rules);
    sim.run()?;
    Ok(sim.finish())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Done,
}

struct DutySimulation<'a> {
    route: &'a RouteProfile,
    ctx: &'a TripContext,
    rules: &'a HosRules,
    planner: StopPlanner<'a>,

    elapsed_hours: f64,
    miles_elapsed: f64,
    driving_since_rest: f64,
    on_duty_since_rest: f64,
    driving_since_break: f64,
    cycle_hours: f64,
    cycle_exceeded_at: Option<f64>,

    segments: Vec<DutySegment>,
    stops: Vec<StopEvent>,
}

impl<'a> DutySimulation<'a> {
    fn new(route: &'a RouteProfile, ctx: &'a TripContext, rules: &'a HosRules) -> Self {
        Self {
            route,
            ctx,
            rules,
            planner: StopPlanner::new(route, rules.fuel_interval_miles),
            elapsed_hours: 0.0,
            miles_elapsed: 0.0,
            driving_since_rest: 0.0,
            on_duty_since_rest: 0.0,
            driving_since_break: 0.0,
            cycle_hours: ctx.cycle_hours_used_at_start,
            cycle_exceeded_at: (ctx.cycle_hours_used_at_start >= rules.cycle_limit_hours - EPSILON)
                .then_some(0.0),
            segments: Vec::new(),
            stops: Vec::new(),
        }
    }

    fn step_budget(&self) -> usize {
        let driving_hours = self.route.driving_hours().ceil();
        let fuel_stops = (self.route.total_distance_miles / self.rules.fuel_interval_miles).ceil();
        let per_hour = 8.0 * (driving_hours + fuel_stops) + self.route.legs.len() as f64;
        BASE_STEP_BUDGET.saturating_add(per_hour.min(1e7) as usize)
    }

    fn run(&mut self) -> Result<(), PlanError> {
        let start_hour = self.ctx.start_hour();
        if start_hour > EPSILON {
            self.push(DutyActivity::HomeTerminal, start_hour, "Home terminal".to_string());
        }
        self.pre_trip();

        let budget = self.step_budget();
        for _ in 0..budget {
            if self.step() == Step::Done {
                return Ok(());
            }
        }
        Err(PlanError::InternalInvariant(format!(
            "scheduler did not finish within {} steps ({:.1} of {:.1} miles)",
            budget, self.miles_elapsed, self.route.total_distance_miles
        )))
    }

    fn step(&mut self) -> Step {
        if let Some(wp) = self.planner.due_waypoint(self.miles_elapsed).cloned() {
            self.planner.complete_waypoint();
            match wp.stop {
                Some(StopType::Pickup) => {
                    let hours = self.rules.pickup_hours;
                    self.on_duty_stop(StopType::Pickup, DutyActivity::Pickup, hours, &wp.place);
                }
                Some(StopType::Dropoff) => {
                    let hours = self.rules.dropoff_hours;
                    self.on_duty_stop(StopType::Dropoff, DutyActivity::Dropoff, hours, &wp.place);
                }
                Some(StopType::Fuel | StopType::Break | StopType::Rest) | None => {}
            }
            return Step::Continue;
        }

        if self.planner.fuel_due(self.miles_elapsed) {
            self.planner.complete_fuel();
            let location = self.planner.location_at(self.miles_elapsed);
            let hours = self.rules.fuel_hours;
            self.on_duty_stop(StopType::Fuel, DutyActivity::Fuel, hours, &location);
            return Step::Continue;
        }

        if self.remaining_miles() <= EPSILON {
            self.close_trip();
            return Step::Done;
        }

        // A rest also counts as a break, so it wins when both are due.
        if self.drive_capacity_hours() <= EPSILON {
            self.rest();
            return Step::Continue;
        }
        if self.break_capacity_hours() <= EPSILON {
            self.take_break();
            return Step::Continue;
        }

        self.drive();
        Step::Continue
    }

    fn remaining_miles(&self) -> f64 {
        self.route.total_distance_miles - self.miles_elapsed
    }

    /// Driving still allowed before the next 10-hour rest. The post-trip
    /// inspection stays reserved inside the 14-hour window.
    fn drive_capacity_hours(&self) -> f64 {
        let driving_left = self.rules.max_driving_hours - self.driving_since_rest;
        let window_left = self.rules.max_on_duty_window_hours
            - self.on_duty_since_rest
            - self.rules.inspection_hours;
        driving_left.min(window_left)
    }

    fn break_capacity_hours(&self) -> f64 {
        self.rules.max_driving_before_break_hours - self.driving_since_break
    }

    fn push(&mut self, activity: DutyActivity, hours: f64, label: String) {
        if hours <= EPSILON {
            return;
        }

        let status = activity.status();
        match status {
            DutyStatus::Driving => {
                self.driving_since_rest += hours;
                self.driving_since_break += hours;
                self.on_duty_since_rest += hours;
            }
            DutyStatus::OnDuty => {
                self.on_duty_since_rest += hours;
            }
            DutyStatus::OffDuty | DutyStatus::SleeperBerth => {}
        }

        if status.is_on_duty() {
            let before = self.cycle_hours;
            self.cycle_hours += hours;
            let limit = self.rules.cycle_limit_hours;
            if self.cycle_exceeded_at.is_none() && self.cycle_hours > limit + EPSILON {
                self.cycle_exceeded_at = Some(self.elapsed_hours + (limit - before).max(0.0));
            }
        }

        self.segments
            .push(DutySegment::new(activity, self.elapsed_hours, hours, label));
        self.elapsed_hours += hours;
    }

    fn pre_trip(&mut self) {
        self.push(
            DutyActivity::PreTripInspection,
            self.rules.inspection_hours,
            "Pre-trip inspection".to_string(),
        );
    }

    fn post_trip(&mut self) {
        self.push(
            DutyActivity::PostTripInspection,
            self.rules.inspection_hours,
            "Post-trip inspection".to_string(),
        );
    }

    /// Pickup, dropoff or fuel. Takes the rest first when the stop would not
    /// fit in what is left of the duty window.
    fn on_duty_stop(&mut self, stop_type: StopType, activity: DutyActivity, hours: f64, place: &str) {
        let needed = self.on_duty_since_rest + hours + self.rules.inspection_hours;
        if needed > self.rules.max_on_duty_window_hours + EPSILON {
            debug!(
                "{} at mile {:.1} does not fit in the duty window, resting first",
                stop_type.as_str(),
                self.miles_elapsed
            );
            self.rest();
        }

        let label = stop_label(stop_type, place);
        let start = self.elapsed_hours;
        self.push(activity, hours, label.clone());
        self.stops.push(StopEvent {
            stop_type,
            mile_marker: self.miles_elapsed,
            duration_hours: hours,
            time_offset_hours: start,
            label,
            location: place.to_string(),
        });
        debug!(
            "{} at mile {:.1}, offset {:.2}h",
            stop_type.as_str(),
            self.miles_elapsed,
            start
        );
    }

    fn take_break(&mut self) {
        let start = self.elapsed_hours;
        let hours = self.rules.break_hours;
        let label = stop_label(StopType::Break, "");
        self.push(DutyActivity::Break, hours, label.clone());
        self.driving_since_break = 0.0;
        self.stops.push(StopEvent {
            stop_type: StopType::Break,
            mile_marker: self.miles_elapsed,
            duration_hours: hours,
            time_offset_hours: start,
            label,
            location: self.planner.location_at(self.miles_elapsed),
        });
        debug!("30-minute break at mile {:.1}", self.miles_elapsed);
    }

    /// Post-trip inspection, off duty until midnight, 10 hours in the sleeper
    /// berth, then the next shift's pre-trip inspection.
    fn rest(&mut self) {
        self.post_trip();

        let start = self.elapsed_hours;
        let location = self.planner.location_at(self.miles_elapsed);
        let fill = hours_until_midnight(self.elapsed_hours);
        self.push(DutyActivity::OffDuty, fill, location.clone());
        self.push(DutyActivity::Rest, self.rules.rest_hours, location.clone());

        self.stops.push(StopEvent {
            stop_type: StopType::Rest,
            mile_marker: self.miles_elapsed,
            duration_hours: self.elapsed_hours - start,
            time_offset_hours: start,
            label: stop_label(StopType::Rest, ""),
            location,
        });
        debug!(
            "Rest at mile {:.1} after {:.2}h driving / {:.2}h on duty",
            self.miles_elapsed, self.driving_since_rest, self.on_duty_since_rest
        );

        self.driving_since_rest = 0.0;
        self.on_duty_since_rest = 0.0;
        self.driving_since_break = 0.0;
        self.pre_trip();
    }

    fn drive(&mut self) {
        let speed = self.route.average_speed_mph;
        let hours = self.drive_capacity_hours().min(self.break_capacity_hours());
        let stop_mile = self.planner.next_stop_mile();

        let mut target = self.miles_elapsed + hours * speed;
        if target >= stop_mile - EPSILON {
            target = stop_mile;
        }

        let label = self.planner.driving_label(self.miles_elapsed);
        let drive_hours = (target - self.miles_elapsed) / speed;
        self.push(DutyActivity::Driving, drive_hours, label);
        self.miles_elapsed = target;
    }

    fn close_trip(&mut self) {
        self.post_trip();
        let fill = hours_until_midnight(self.elapsed_hours);
        let location = self.planner.destination().to_string();
        self.push(DutyActivity::OffDuty, fill, location);
    }

    fn finish(self) -> Schedule {
        let mut warnings = Vec::new();
        if let Some(offset) = self.cycle_exceeded_at {
            let available = (self.rules.cycle_limit_hours - self.ctx.cycle_hours_used_at_start).max(0.0);
            let required = self.cycle_hours - self.ctx.cycle_hours_used_at_start;
            let message = format!(
                "Trip needs {:.2}h on duty but only {:.2}h remain in the {}h cycle",
                required, available, self.rules.cycle_limit_hours
            );
            warn!("{}", message);
            warnings.push(PlanWarning {
                warning_type: WarningType::CycleLimitExceeded,
                message,
                offset_hours: Some(offset),
            });
        }

        Schedule {
            segments: self.segments,
            stops: self.stops,
            warnings,
            cycle_hours_at_end: self.cycle_hours,
        }
    }
}

/// Hours left in the current day, zero when already at midnight.
pub(crate) fn hours_until_midnight(offset_hours: f64) -> f64 {
    let into_day = offset_hours.rem_euclid(HOURS_PER_DAY);
    if into_day < EPSILON || HOURS_PER_DAY - into_day < EPSILON {
        0.0
    } else {
        HOURS_PER_DAY - into_day
    }
}
