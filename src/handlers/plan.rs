//! Trip plan handler

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, error};
use uuid::Uuid;

use crate::services::planner::TripPlanner;
use crate::types::{ErrorResponse, Request, SuccessResponse, TripPlan, TripPlanRequest};

/// Plan one trip request.
pub fn handle_plan(
    request: &Request<TripPlanRequest>,
    planner: &TripPlanner,
) -> std::result::Result<SuccessResponse<TripPlan>, ErrorResponse> {
    let payload = &request.payload;
    match planner.plan(&payload.route, &payload.trip) {
        Ok(plan) => Ok(SuccessResponse::new(request.id, plan)),
        Err(e) => {
            error!("Failed to plan trip {}: {}", request.id, e);
            Err(ErrorResponse::new(request.id, e.code(), e.to_string()))
        }
    }
}

/// Handle a raw JSON message: either a full `Request` envelope or a bare
/// `TripPlanRequest`. Always produces a response document.
pub fn handle_plan_message(payload: &[u8], planner: &TripPlanner) -> Result<Value> {
    let request: Request<TripPlanRequest> = match serde_json::from_slice(payload) {
        Ok(req) => req,
        Err(envelope_err) => match serde_json::from_slice::<TripPlanRequest>(payload) {
            Ok(bare) => {
                debug!("Received bare trip plan request, wrapping in envelope");
                Request::new(bare)
            }
            Err(e) => {
                error!("Failed to parse trip plan request: {}", envelope_err);
                let error = ErrorResponse::new(
                    Uuid::nil(),
                    "INVALID_REQUEST",
                    format!("Failed to parse request: {}", e),
                );
                return Ok(serde_json::to_value(error)?);
            }
        },
    };

    let response = match handle_plan(&request, planner) {
        Ok(success) => serde_json::to_value(success)?,
        Err(error) => serde_json::to_value(error)?,
    };
    Ok(response)
}
