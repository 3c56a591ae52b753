//! End-to-end planning scenarios and timeline properties.

use chrono::NaiveDate;

use hos_trip_planner::services::log_assembler::assemble;
use hos_trip_planner::services::scheduler::schedule;
use hos_trip_planner::services::validation::audit_schedule;
use hos_trip_planner::types::{
    DailyLog, RouteLeg, RouteProfile, StopType, TripContext, TripPlan, WarningType,
};
use hos_trip_planner::{HosRules, PlanError, TripPlanner};

fn trip(cycle: f64, hour: u32) -> TripContext {
    let start = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap();
    TripContext::new(cycle, start)
}

fn plan(route: &RouteProfile, ctx: &TripContext) -> TripPlan {
    TripPlanner::default().plan(route, ctx).unwrap()
}

fn count_stops(plan: &TripPlan, stop_type: StopType) -> usize {
    plan.stops.iter().filter(|s| s.stop_type == stop_type).count()
}

fn assert_full_days(logs: &[DailyLog]) {
    let (last, full) = logs.split_last().unwrap();
    for log in full {
        assert!(
            (log.logged_hours() - 24.0).abs() < 1e-4,
            "day {} logs {}h",
            log.day_number,
            log.logged_hours()
        );
        assert!((log.hour_totals.total() - 24.0).abs() < 1e-9);
    }
    assert!(last.logged_hours() <= 24.0 + 1e-4);
}

#[test]
fn scenario_short_trip_fits_one_day() {
    let route = RouteProfile::two_leg("Atlanta, GA", "Macon, GA", "Jacksonville, FL", 200.0, 300.0);
    let plan = plan(&route, &trip(0.0, 8));

    assert_eq!(plan.daily_logs.len(), 1);
    assert_eq!(plan.daily_logs[0].hour_totals.driving, 10.0);
    assert_eq!(plan.summary.total_driving_hours, 10.0);
    assert_eq!(count_stops(&plan, StopType::Rest), 0);
    assert_eq!(count_stops(&plan, StopType::Fuel), 0);
    assert_eq!(count_stops(&plan, StopType::Pickup), 1);
    assert_eq!(count_stops(&plan, StopType::Dropoff), 1);
    assert!(plan.warnings.is_empty());
}

#[test]
fn scenario_long_trip_spans_days_with_rest_and_fuel() {
    let route = RouteProfile::two_leg("Atlanta, GA", "Nashville, TN", "Denver, CO", 200.0, 1000.0);
    let plan = plan(&route, &trip(0.0, 8));

    assert!(plan.daily_logs.len() >= 2);
    assert!(count_stops(&plan, StopType::Rest) >= 1);

    let fuel: Vec<_> = plan
        .stops
        .iter()
        .filter(|s| s.stop_type == StopType::Fuel)
        .collect();
    assert_eq!(fuel.len(), 1);
    assert!((fuel[0].mile_marker - 1000.0).abs() < 0.1);

    // every day before the dropoff day ends with the driver resting
    let dropoff_day = plan
        .stops
        .iter()
        .find(|s| s.stop_type == StopType::Dropoff)
        .unwrap()
        .day_number;
    for log in plan.daily_logs.iter().filter(|l| l.day_number < dropoff_day) {
        let last = log.segments.last().unwrap();
        assert!(!last.status.is_on_duty(), "day {} ends on duty", log.day_number);
    }
}

#[test]
fn scenario_long_trip_at_sixty_mph_needs_one_rest() {
    let route = RouteProfile::two_leg("Atlanta, GA", "Nashville, TN", "Denver, CO", 200.0, 1000.0)
        .with_speed(60.0);
    let plan = plan(&route, &trip(0.0, 8));

    assert_eq!(count_stops(&plan, StopType::Rest), 1);
    assert_eq!(plan.daily_logs.len(), 2);
    assert!((plan.summary.total_driving_hours - 20.0).abs() < 1e-9);
}

#[test]
fn scenario_exhausted_cycle_still_plans_with_warning() {
    let route = RouteProfile::two_leg("Atlanta, GA", "Macon, GA", "Jacksonville, FL", 200.0, 300.0);
    let plan = plan(&route, &trip(70.0, 8));

    assert!(!plan.daily_logs.is_empty());
    assert_eq!(plan.warnings.len(), 1);
    assert_eq!(plan.warnings[0].warning_type, WarningType::CycleLimitExceeded);
    assert_eq!(plan.summary.cycle_hours_remaining, 0.0);
}

#[test]
fn scenario_zero_distance_is_rejected() {
    let route = RouteProfile::new(0.0, vec![RouteLeg::new("A", "A", 0.0)]);
    let err = TripPlanner::default().plan(&route, &trip(0.0, 8)).unwrap_err();
    assert!(matches!(err, PlanError::Configuration(_)));
}

#[test]
fn timelines_respect_hos_limits_for_many_routes() {
    let rules = HosRules::default();
    for (to_pickup, to_dropoff) in [
        (0.0, 120.0),
        (35.0, 560.0),
        (410.0, 410.0),
        (999.0, 1.0),
        (1000.0, 1000.0),
        (250.0, 2750.0),
    ] {
        for hour in [0, 6, 17, 23] {
            let route = RouteProfile::two_leg("A", "B", "C", to_pickup, to_dropoff);
            let ctx = trip(12.0, hour);
            let result = schedule(&route, &ctx, &rules).unwrap();
            assert_eq!(
                audit_schedule(&result, &route, &rules),
                Ok(()),
                "{} + {} mi from {}:00",
                to_pickup,
                to_dropoff,
                hour
            );
        }
    }
}

#[test]
fn daily_logs_cover_whole_days_and_all_miles() {
    for miles in [180.0, 640.0, 1200.0, 2600.0] {
        let route = RouteProfile::two_leg("A", "B", "C", miles * 0.2, miles * 0.8);
        let plan = plan(&route, &trip(0.0, 7));

        assert_full_days(&plan.daily_logs);
        let driven: f64 = plan.daily_logs.iter().map(|l| l.total_miles_driven).sum();
        assert!((driven - miles).abs() <= 1.0, "{} of {} mi", driven, miles);

        for (i, log) in plan.daily_logs.iter().enumerate() {
            assert_eq!(log.day_number as usize, i + 1);
            assert_eq!(
                log.calendar_date,
                NaiveDate::from_ymd_opt(2026, 10, 19 + i as u32).unwrap()
            );
        }
    }
}

#[test]
fn stops_are_ordered_and_fuel_lands_on_interval() {
    let route = RouteProfile::two_leg("A", "B", "C", 300.0, 2900.0);
    let plan = plan(&route, &trip(0.0, 0));

    for pair in plan.stops.windows(2) {
        assert!(pair[1].mile_marker >= pair[0].mile_marker);
        assert!(pair[1].time_offset_hours > pair[0].time_offset_hours);
    }
    assert_eq!(count_stops(&plan, StopType::Pickup), 1);
    assert_eq!(count_stops(&plan, StopType::Dropoff), 1);

    let fuel_miles: Vec<f64> = plan
        .stops
        .iter()
        .filter(|s| s.stop_type == StopType::Fuel)
        .map(|s| s.mile_marker)
        .collect();
    assert_eq!(fuel_miles, vec![1000.0, 2000.0, 3000.0]);
}

#[test]
fn assemble_is_idempotent() {
    let route = RouteProfile::two_leg("A", "B", "C", 520.0, 1380.0);
    let ctx = trip(30.0, 14);
    let result = schedule(&route, &ctx, &HosRules::default()).unwrap();

    let first = assemble(&result.segments, &result.stops, &route, &ctx).unwrap();
    let second = assemble(&result.segments, &result.stops, &route, &ctx).unwrap();
    assert_eq!(first, second);
}

#[test]
fn plan_serializes_with_camel_case_fields() {
    let route = RouteProfile::two_leg("A", "B", "C", 100.0, 100.0);
    let json = serde_json::to_value(plan(&route, &trip(0.0, 8))).unwrap();

    assert!(json["summary"]["totalDrivingDisplay"].is_string());
    assert_eq!(json["dailyLogs"][0]["calendarDate"], "2026-10-19");
    assert_eq!(json["dailyLogs"][0]["segments"][0]["status"], "sleeper");
    assert!(json["dailyLogs"][0]["hourTotals"]["sleeperBerth"].is_number());
}
