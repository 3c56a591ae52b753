//! Hours-of-service limits used by the scheduler

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::defaults::*;

/// Numeric limits and fixed stop durations, in hours (and miles for fuel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HosRules {
    /// Driving allowed between qualifying rests
    pub max_driving_hours: f64,
    /// Driving plus on-duty allowed between qualifying rests
    pub max_on_duty_window_hours: f64,
    /// Driving allowed before a qualifying break
    pub max_driving_before_break_hours: f64,
    pub cycle_limit_hours: f64,
    pub break_hours: f64,
    pub rest_hours: f64,
    /// Pre-trip and post-trip inspection each
    pub inspection_hours: f64,
    pub pickup_hours: f64,
    pub dropoff_hours: f64,
    pub fuel_hours: f64,
    pub fuel_interval_miles: f64,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            max_driving_hours: MAX_DRIVING_HOURS,
            max_on_duty_window_hours: MAX_ON_DUTY_WINDOW_HOURS,
            max_driving_before_break_hours: MAX_DRIVING_BEFORE_BREAK_HOURS,
            cycle_limit_hours: CYCLE_LIMIT_HOURS,
            break_hours: BREAK_HOURS,
            rest_hours: REST_HOURS,
            inspection_hours: INSPECTION_HOURS,
            pickup_hours: PICKUP_HOURS,
            dropoff_hours: DROPOFF_HOURS,
            fuel_hours: FUEL_HOURS,
            fuel_interval_miles: FUEL_INTERVAL_MILES,
        }
    }
}

impl HosRules {
    /// Set the pickup and dropoff dwell times
    pub fn with_dock_hours(mut self, pickup_hours: f64, dropoff_hours: f64) -> Self {
        self.pickup_hours = pickup_hours;
        self.dropoff_hours = dropoff_hours;
        self
    }

    pub fn with_fuel_interval(mut self, fuel_interval_miles: f64) -> Self {
        self.fuel_interval_miles = fuel_interval_miles;
        self
    }

    /// Room left in the duty window for anything other than the closing inspection.
    pub fn usable_window_hours(&self) -> f64 {
        self.max_on_duty_window_hours - 2.0 * self.inspection_hours
    }

    /// Reject rule sets the scheduler cannot make progress with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_driving_hours", self.max_driving_hours),
            ("max_on_duty_window_hours", self.max_on_duty_window_hours),
            ("max_driving_before_break_hours", self.max_driving_before_break_hours),
            ("cycle_limit_hours", self.cycle_limit_hours),
            ("break_hours", self.break_hours),
            ("rest_hours", self.rest_hours),
            ("fuel_interval_miles", self.fuel_interval_miles),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                anyhow::bail!("{} must be positive (got {})", name, value);
            }
        }

        let non_negative = [
            ("inspection_hours", self.inspection_hours),
            ("pickup_hours", self.pickup_hours),
            ("dropoff_hours", self.dropoff_hours),
            ("fuel_hours", self.fuel_hours),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} must not be negative (got {})", name, value);
            }
        }

        let longest_stop = self.pickup_hours.max(self.dropoff_hours).max(self.fuel_hours);
        if self.usable_window_hours() <= longest_stop {
            anyhow::bail!(
                "duty window of {}h cannot fit inspections and a {}h stop",
                self.max_on_duty_window_hours,
                longest_stop
            );
        }

        if self.rest_hours >= HOURS_PER_DAY || self.rest_hours < self.break_hours {
            anyhow::bail!("rest_hours must be at least break_hours and under 24");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = HosRules::default();
        assert_eq!(rules.max_driving_hours, 11.0);
        assert_eq!(rules.max_on_duty_window_hours, 14.0);
        assert_eq!(rules.max_driving_before_break_hours, 8.0);
        assert_eq!(rules.fuel_interval_miles, 1000.0);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_usable_window_excludes_inspections() {
        assert!((HosRules::default().usable_window_hours() - 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_zero_fuel_interval() {
        let rules = HosRules::default().with_fuel_interval(0.0);
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("fuel_interval_miles"));
    }

    #[test]
    fn test_validate_rejects_stop_longer_than_window() {
        let rules = HosRules::default().with_dock_hours(13.5, 1.0);
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_builders_override_values() {
        let rules = HosRules::default().with_dock_hours(2.0, 1.5).with_fuel_interval(800.0);
        assert_eq!(rules.pickup_hours, 2.0);
        assert_eq!(rules.dropoff_hours, 1.5);
        assert_eq!(rules.fuel_interval_miles, 800.0);
    }
}
