//! Daily log assembly.
//!
//! Cuts the continuous duty timeline at every midnight (multiples of 24h
//! from the timeline origin) and builds one ELD log per day: the segment
//! slices, per-status hour totals, miles driven and remarks.

use chrono::Days;

use crate::defaults::{EPSILON, HOURS_PER_DAY};
use crate::error::PlanError;
use crate::services::projection::{format_clock, round_to};
use crate::services::stop_planner::stop_remark;
use crate::types::{
    DailyLog, DutyActivity, DutySegment, DutyStatus, HourTotals, RouteProfile, StopEvent,
    TripContext,
};

/// Slack for the 24-hour day sum check.
const DAY_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Default)]
struct DayBucket {
    segments: Vec<DutySegment>,
    /// Duty transitions that begin on this day
    transitions: Vec<String>,
}

/// Build the daily logs for a scheduled trip.
pub fn assemble(
    segments: &[DutySegment],
    stops: &[StopEvent],
    route: &RouteProfile,
    ctx: &TripContext,
) -> Result<Vec<DailyLog>, PlanError> {
    let Some(last) = segments.last() else {
        return Ok(Vec::new());
    };
    check_contiguous(segments)?;

    let trip_end = last.end_offset_hours();
    let day_count = (((trip_end - EPSILON) / HOURS_PER_DAY).ceil() as usize).max(1);
    let mut days: Vec<DayBucket> = (0..day_count).map(|_| DayBucket::default()).collect();

    for seg in segments {
        if let Some(note) = transition_note(seg) {
            days[day_index(seg.start_offset_hours, day_count)].transitions.push(note);
        }

        let end = seg.end_offset_hours();
        let mut start = seg.start_offset_hours;
        while end - start > EPSILON {
            let day = day_index(start, day_count);
            let day_end = (day + 1) as f64 * HOURS_PER_DAY;
            let piece_end = if end <= day_end + EPSILON || day + 1 == day_count {
                end
            } else {
                day_end
            };
            days[day].segments.push(seg.slice(start, piece_end));
            start = piece_end;
        }
    }

    let mut logs = Vec::with_capacity(day_count);
    for (day, bucket) in days.into_iter().enumerate() {
        let is_last = day + 1 == day_count;
        logs.push(build_log(day, bucket, is_last, stops, route, ctx)?);
    }
    Ok(logs)
}

fn day_index(offset_hours: f64, day_count: usize) -> usize {
    let day = ((offset_hours + EPSILON) / HOURS_PER_DAY).floor().max(0.0) as usize;
    day.min(day_count - 1)
}

fn check_contiguous(segments: &[DutySegment]) -> Result<(), PlanError> {
    if segments[0].start_offset_hours.abs() > DAY_TOLERANCE {
        return Err(PlanError::InternalInvariant(format!(
            "timeline starts at {:.4}h instead of 0",
            segments[0].start_offset_hours
        )));
    }
    for (i, pair) in segments.windows(2).enumerate() {
        let gap = pair[1].start_offset_hours - pair[0].end_offset_hours();
        if gap.abs() > DAY_TOLERANCE {
            return Err(PlanError::InternalInvariant(format!(
                "segments {} and {} are not contiguous ({:+.4}h)",
                i,
                i + 1,
                gap
            )));
        }
        if pair[1].duration_hours < 0.0 {
            return Err(PlanError::InternalInvariant(format!(
                "segment {} has negative duration",
                i + 1
            )));
        }
    }
    Ok(())
}

fn transition_note(seg: &DutySegment) -> Option<String> {
    let clock = format_clock(seg.start_offset_hours);
    match seg.activity {
        DutyActivity::HomeTerminal => Some("Trip started from home terminal".to_string()),
        DutyActivity::PreTripInspection => Some(format!("Pre-trip inspection {}", clock)),
        DutyActivity::PostTripInspection => Some(format!("Post-trip inspection {}", clock)),
        DutyActivity::Rest => Some(format!("Sleeper berth {}", clock)),
        DutyActivity::Driving
        | DutyActivity::Pickup
        | DutyActivity::Dropoff
        | DutyActivity::Fuel
        | DutyActivity::Break
        | DutyActivity::OffDuty => None,
    }
}

fn build_log(
    day: usize,
    bucket: DayBucket,
    is_last: bool,
    stops: &[StopEvent],
    route: &RouteProfile,
    ctx: &TripContext,
) -> Result<DailyLog, PlanError> {
    let mut totals = HourTotals::default();
    for seg in &bucket.segments {
        totals.add(seg.status, seg.duration_hours);
    }

    let logged = totals.total();
    let complete_day = (logged - HOURS_PER_DAY).abs() <= DAY_TOLERANCE;
    if (!is_last && !complete_day) || logged > HOURS_PER_DAY + DAY_TOLERANCE {
        return Err(PlanError::InternalInvariant(format!(
            "day {} logs {:.4}h",
            day + 1,
            logged
        )));
    }

    let mut remarks: Vec<String> = stops
        .iter()
        .filter(|stop| {
            let start = day as f64 * HOURS_PER_DAY;
            stop.time_offset_hours >= start - EPSILON
                && stop.time_offset_hours < start + HOURS_PER_DAY - EPSILON
        })
        .map(stop_remark)
        .collect();

    let mut transitions = bucket.transitions;
    if is_last {
        transitions.push("Trip completed".to_string());
    }
    if !transitions.is_empty() {
        remarks.push(transitions.join("; "));
    }

    let calendar_date = ctx
        .start_date()
        .checked_add_days(Days::new(day as u64))
        .ok_or_else(|| {
            PlanError::InternalInvariant(format!("day {} is past the calendar range", day + 1))
        })?;

    Ok(DailyLog {
        day_number: day as u32 + 1,
        calendar_date,
        segments: bucket.segments,
        hour_totals: totals.rounded(),
        total_miles_driven: round_to(totals.get(DutyStatus::Driving) * route.average_speed_mph, 2),
        remarks,
    })
}
