//! Output projection: trip summary, stop views and display formatting.

use crate::defaults::HOURS_PER_DAY;
use crate::services::rules::HosRules;
use crate::services::scheduler::Schedule;
use crate::types::{
    DailyLog, DutyStatus, RouteProfile, StopEvent, StopView, TripContext, TripPlan, TripSummary,
};

/// Round to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Clock time "HH:MM" of a timeline offset within its day.
pub fn format_clock(offset_hours: f64) -> String {
    let minutes = (offset_hours.rem_euclid(HOURS_PER_DAY) * 60.0).round() as i64 % (24 * 60);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Duration as "H:MM".
pub fn format_hours(hours: f64) -> String {
    let minutes = (hours.max(0.0) * 60.0).round() as i64;
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

fn stop_view(stop: &StopEvent) -> StopView {
    let day = (stop.time_offset_hours / HOURS_PER_DAY).floor().max(0.0) as u32;
    StopView {
        stop_type: stop.stop_type,
        label: stop.label.clone(),
        location: stop.location.clone(),
        mile_marker: round_to(stop.mile_marker, 1),
        duration_hours: round_to(stop.duration_hours, 2),
        time_offset_hours: round_to(stop.time_offset_hours, 2),
        day_number: day + 1,
        clock_time: format_clock(stop.time_offset_hours),
    }
}

/// Package the scheduled and assembled trip for consumers.
pub fn project(
    schedule: &Schedule,
    daily_logs: Vec<DailyLog>,
    route: &RouteProfile,
    ctx: &TripContext,
    rules: &HosRules,
) -> TripPlan {
    let driving = schedule.hours_in(DutyStatus::Driving);
    let on_duty = driving + schedule.hours_in(DutyStatus::OnDuty);
    let cycle_at_end = ctx.cycle_hours_used_at_start + on_duty;

    let summary = TripSummary {
        total_distance_miles: round_to(route.total_distance_miles, 2),
        total_driving_hours: round_to(driving, 2),
        total_driving_display: format_hours(driving),
        total_on_duty_hours: round_to(on_duty, 2),
        estimated_days: daily_logs.len() as u32,
        trip_end_offset_hours: round_to(schedule.trip_end_offset(), 2),
        cycle_hours_used_at_end: round_to(cycle_at_end, 2),
        cycle_hours_remaining: round_to((rules.cycle_limit_hours - cycle_at_end).max(0.0), 2),
    };

    TripPlan {
        summary,
        daily_logs,
        stops: schedule.stops.iter().map(stop_view).collect(),
        warnings: schedule.warnings.clone(),
    }
}
