//! Input validation and schedule audit.
//!
//! Inputs are checked before the simulation starts so no partial result is
//! ever produced. The audit re-walks a finished timeline with its own
//! accumulators and reports any broken HOS limit or tiling gap as an
//! internal invariant error.

use crate::defaults::EPSILON;
use crate::error::PlanError;
use crate::services::rules::HosRules;
use crate::services::scheduler::Schedule;
use crate::types::{DutyStatus, RouteProfile, StopType, TripContext};

/// Slack allowed when comparing accumulated floating-point hours.
const AUDIT_TOLERANCE: f64 = 1e-4;

/// Reject malformed route profiles.
pub fn validate_route(route: &RouteProfile) -> Result<(), PlanError> {
    let total = route.total_distance_miles;
    if !total.is_finite() || total <= 0.0 {
        return Err(PlanError::Configuration(format!(
            "total distance must be positive (got {})",
            total
        )));
    }
    if route.legs.is_empty() {
        return Err(PlanError::Configuration("route has no legs".to_string()));
    }
    if !route.average_speed_mph.is_finite() || route.average_speed_mph <= 0.0 {
        return Err(PlanError::Configuration(format!(
            "average speed must be positive (got {})",
            route.average_speed_mph
        )));
    }

    for (i, leg) in route.legs.iter().enumerate() {
        if !leg.distance_miles.is_finite() || leg.distance_miles < 0.0 {
            return Err(PlanError::Configuration(format!(
                "leg {} ({} -> {}) has invalid distance {}",
                i + 1,
                leg.from_label,
                leg.to_label,
                leg.distance_miles
            )));
        }
    }

    let leg_sum = route.leg_distance_sum();
    let tolerance = (total * 0.01).max(1.0);
    if (leg_sum - total).abs() > tolerance {
        return Err(PlanError::Configuration(format!(
            "leg distances sum to {:.1} mi but total distance is {:.1} mi",
            leg_sum, total
        )));
    }

    Ok(())
}

/// Reject cycle balances outside `[0, cycle limit]`.
pub fn validate_context(ctx: &TripContext, rules: &HosRules) -> Result<(), PlanError> {
    let used = ctx.cycle_hours_used_at_start;
    if !used.is_finite() || used < 0.0 || used > rules.cycle_limit_hours {
        return Err(PlanError::Validation(format!(
            "cycle hours used must be between 0 and {} (got {})",
            rules.cycle_limit_hours, used
        )));
    }
    Ok(())
}

/// Re-check a finished schedule against the tiling and HOS invariants.
pub fn audit_schedule(
    schedule: &Schedule,
    route: &RouteProfile,
    rules: &HosRules,
) -> Result<(), PlanError> {
    audit_segments(schedule, rules)?;
    audit_mileage(schedule, route)?;
    audit_stops(schedule, route, rules)
}

fn violation(message: String) -> Result<(), PlanError> {
    Err(PlanError::InternalInvariant(message))
}

fn audit_segments(schedule: &Schedule, rules: &HosRules) -> Result<(), PlanError> {
    let mut expected_start = 0.0;
    let mut driving_since_rest = 0.0;
    let mut on_duty_since_rest = 0.0;
    let mut driving_since_break = 0.0;
    let mut off_duty_run = 0.0;

    for (i, seg) in schedule.segments.iter().enumerate() {
        if !seg.duration_hours.is_finite() || seg.duration_hours <= 0.0 {
            return violation(format!(
                "segment {} has non-positive duration {}",
                i, seg.duration_hours
            ));
        }
        if (seg.start_offset_hours - expected_start).abs() > AUDIT_TOLERANCE {
            return violation(format!(
                "segment {} starts at {:.4}h, expected {:.4}h",
                i, seg.start_offset_hours, expected_start
            ));
        }
        expected_start = seg.end_offset_hours();

        let hours = seg.duration_hours;
        match seg.status {
            DutyStatus::OffDuty | DutyStatus::SleeperBerth => {
                off_duty_run += hours;
                if off_duty_run >= rules.rest_hours - EPSILON {
                    driving_since_rest = 0.0;
                    on_duty_since_rest = 0.0;
                    driving_since_break = 0.0;
                } else if off_duty_run >= rules.break_hours - EPSILON {
                    driving_since_break = 0.0;
                }
            }
            DutyStatus::Driving => {
                off_duty_run = 0.0;
                driving_since_rest += hours;
                on_duty_since_rest += hours;
                driving_since_break += hours;
            }
            DutyStatus::OnDuty => {
                off_duty_run = 0.0;
                on_duty_since_rest += hours;
            }
        }

        if driving_since_rest > rules.max_driving_hours + AUDIT_TOLERANCE {
            return violation(format!(
                "{:.2}h driving without a qualifying rest at segment {}",
                driving_since_rest, i
            ));
        }
        if on_duty_since_rest > rules.max_on_duty_window_hours + AUDIT_TOLERANCE {
            return violation(format!(
                "{:.2}h on duty without a qualifying rest at segment {}",
                on_duty_since_rest, i
            ));
        }
        if driving_since_break > rules.max_driving_before_break_hours + AUDIT_TOLERANCE {
            return violation(format!(
                "{:.2}h driving without a qualifying break at segment {}",
                driving_since_break, i
            ));
        }
    }

    Ok(())
}

fn audit_mileage(schedule: &Schedule, route: &RouteProfile) -> Result<(), PlanError> {
    let driven = schedule.hours_in(DutyStatus::Driving) * route.average_speed_mph;
    if (driven - route.total_distance_miles).abs() > 1e-3 {
        return violation(format!(
            "timeline drives {:.3} mi of a {:.3} mi route",
            driven, route.total_distance_miles
        ));
    }
    Ok(())
}

fn audit_stops(schedule: &Schedule, route: &RouteProfile, rules: &HosRules) -> Result<(), PlanError> {
    for pair in schedule.stops.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.mile_marker < prev.mile_marker - EPSILON {
            return violation(format!(
                "{} at mile {:.1} comes after {} at mile {:.1}",
                next.stop_type.as_str(),
                next.mile_marker,
                prev.stop_type.as_str(),
                prev.mile_marker
            ));
        }
        if next.time_offset_hours < prev.end_offset_hours() - AUDIT_TOLERANCE {
            return violation(format!(
                "{} at {:.2}h overlaps {} ending at {:.2}h",
                next.stop_type.as_str(),
                next.time_offset_hours,
                prev.stop_type.as_str(),
                prev.end_offset_hours()
            ));
        }
    }

    for stop_type in [StopType::Pickup, StopType::Dropoff] {
        let count = schedule.stops_of(stop_type).count();
        if count != 1 {
            return violation(format!("expected one {}, found {}", stop_type.as_str(), count));
        }
    }

    for fuel in schedule.stops_of(StopType::Fuel) {
        let intervals = fuel.mile_marker / rules.fuel_interval_miles;
        if (intervals - intervals.round()).abs() * rules.fuel_interval_miles > EPSILON
            || fuel.mile_marker >= route.total_distance_miles
        {
            return violation(format!("fuel stop at mile {:.3}", fuel.mile_marker));
        }
    }

    Ok(())
}
