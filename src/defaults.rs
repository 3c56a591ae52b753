//! Default hours-of-service limits (property-carrying driver, 70h/8-day cycle).

pub const DEFAULT_AVERAGE_SPEED_MPH: f64 = 50.0;

pub const MAX_DRIVING_HOURS: f64 = 11.0;
pub const MAX_ON_DUTY_WINDOW_HOURS: f64 = 14.0;
pub const MAX_DRIVING_BEFORE_BREAK_HOURS: f64 = 8.0;
pub const CYCLE_LIMIT_HOURS: f64 = 70.0;

pub const BREAK_HOURS: f64 = 0.5;
pub const REST_HOURS: f64 = 10.0;
pub const INSPECTION_HOURS: f64 = 0.5;
pub const PICKUP_HOURS: f64 = 1.0;
pub const DROPOFF_HOURS: f64 = 1.0;
pub const FUEL_HOURS: f64 = 0.5;
pub const FUEL_INTERVAL_MILES: f64 = 1000.0;

pub const HOURS_PER_DAY: f64 = 24.0;

/// Tolerance for comparing accumulated hour and mile values.
pub const EPSILON: f64 = 1e-6;
