//! Trip planner: schedule, audit, assemble and project in one call.

use std::time::Instant;

use tracing::{error, info, warn};

use crate::error::PlanError;
use crate::services::log_assembler::assemble;
use crate::services::projection::project;
use crate::services::rules::HosRules;
use crate::services::scheduler::schedule;
use crate::services::validation::audit_schedule;
use crate::types::{RouteProfile, TripContext, TripPlan};

/// Plans trips under one set of HOS rules.
#[derive(Debug, Clone, Default)]
pub struct TripPlanner {
    rules: HosRules,
}

impl TripPlanner {
    pub fn new(rules: HosRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    /// Plan a trip. The result depends only on the route, the trip context
    /// and the rules.
    pub fn plan(&self, route: &RouteProfile, ctx: &TripContext) -> Result<TripPlan, PlanError> {
        let started_at = Instant::now();
        info!(
            "Planning {:.1} mi trip over {} legs at {} mph, cycle used {:.2}h",
            route.total_distance_miles,
            route.legs.len(),
            route.average_speed_mph,
            ctx.cycle_hours_used_at_start
        );

        let schedule = schedule(route, ctx, &self.rules)?;

        if let Err(err) = audit_schedule(&schedule, route, &self.rules) {
            error!("Schedule audit failed: {}", err);
            return Err(err);
        }

        let daily_logs = match assemble(&schedule.segments, &schedule.stops, route, ctx) {
            Ok(logs) => logs,
            Err(err) => {
                error!("Daily log assembly failed: {}", err);
                return Err(err);
            }
        };

        for warning in &schedule.warnings {
            warn!("Plan warning {:?}: {}", warning.warning_type, warning.message);
        }

        let plan = project(&schedule, daily_logs, route, ctx, &self.rules);
        info!(
            "Trip planned: {} days, {} segments, {} stops, {} driving in {} ms",
            plan.daily_logs.len(),
            schedule.segments.len(),
            plan.stops.len(),
            plan.summary.total_driving_display,
            started_at.elapsed().as_millis()
        );
        Ok(plan)
    }
}
