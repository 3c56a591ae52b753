//! ELD daily log types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DutySegment, DutyStatus};

/// Hours spent in each duty status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourTotals {
    pub off_duty: f64,
    pub sleeper_berth: f64,
    pub driving: f64,
    pub on_duty: f64,
}

impl HourTotals {
    pub fn add(&mut self, status: DutyStatus, hours: f64) {
        *self.slot_mut(status) += hours;
    }

    pub fn get(&self, status: DutyStatus) -> f64 {
        match status {
            DutyStatus::OffDuty => self.off_duty,
            DutyStatus::SleeperBerth => self.sleeper_berth,
            DutyStatus::Driving => self.driving,
            DutyStatus::OnDuty => self.on_duty,
        }
    }

    fn slot_mut(&mut self, status: DutyStatus) -> &mut f64 {
        match status {
            DutyStatus::OffDuty => &mut self.off_duty,
            DutyStatus::SleeperBerth => &mut self.sleeper_berth,
            DutyStatus::Driving => &mut self.driving,
            DutyStatus::OnDuty => &mut self.on_duty,
        }
    }

    pub fn total(&self) -> f64 {
        self.off_duty + self.sleeper_berth + self.driving + self.on_duty
    }

    /// Driving plus on-duty (not driving).
    pub fn on_duty_total(&self) -> f64 {
        self.driving + self.on_duty
    }

    /// Round every total to hundredths while keeping their sum equal to the
    /// rounded grand total (largest remainder first).
    pub fn rounded(&self) -> Self {
        let target_cents = (self.total() * 100.0).round() as i64;
        let mut floors = [0i64; 4];
        let mut remainders = [(0.0f64, 0usize); 4];
        for (i, status) in DutyStatus::ALL.iter().enumerate() {
            let cents = self.get(*status).max(0.0) * 100.0;
            floors[i] = cents.floor() as i64;
            remainders[i] = (cents - cents.floor(), i);
        }

        let mut missing = target_cents - floors.iter().sum::<i64>();
        remainders.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        for (_, i) in remainders {
            if missing <= 0 {
                break;
            }
            floors[i] += 1;
            missing -= 1;
        }

        let mut rounded = Self::default();
        for (i, status) in DutyStatus::ALL.iter().enumerate() {
            *rounded.slot_mut(*status) = floors[i] as f64 / 100.0;
        }
        rounded
    }
}

/// One calendar day of the driver's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub day_number: u32,
    pub calendar_date: NaiveDate,
    pub segments: Vec<DutySegment>,
    pub hour_totals: HourTotals,
    pub total_miles_driven: f64,
    pub remarks: Vec<String>,
}

impl DailyLog {
    /// Sum of segment durations (unrounded).
    pub fn logged_hours(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_hours).sum()
    }
}
