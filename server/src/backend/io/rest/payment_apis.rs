//! # REST API for Payment Status
//!
//! Bulk paid/unpaid marking per participant.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{post, put},
    Router,
};
use log::info;

use crate::backend::domain::commands::payments::{SetPaidCommand, TogglePaidCommand};
use crate::backend::io::rest::errors::{error_response, json_body};
use crate::backend::io::rest::mappers::SummaryMapper;
use crate::backend::AppState;
use shared::SetPaidRequest;

/// Create a router for payment related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:name/paid", put(set_paid))
        .route("/:name/paid/toggle", post(toggle_paid))
}

pub async fn toggle_paid(
    State(state): State<AppState>,
    Path(participant_name): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/participants/{}/paid/toggle", participant_name);

    match state
        .payment_service
        .toggle_paid(TogglePaidCommand { participant_name })
    {
        Ok(result) => (StatusCode::OK, Json(SummaryMapper::to_payment_response(result))).into_response(),
        Err(e) => error_response("Failed to toggle payment status", e),
    }
}

pub async fn set_paid(
    State(state): State<AppState>,
    Path(participant_name): Path<String>,
    payload: Result<Json<SetPaidRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match json_body(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!("PUT /api/participants/{}/paid - request: {:?}", participant_name, request);

    let command = SetPaidCommand {
        participant_name,
        paid: request.paid,
    };
    match state.payment_service.set_paid(command) {
        Ok(result) => (StatusCode::OK, Json(SummaryMapper::to_payment_response(result))).into_response(),
        Err(e) => error_response("Failed to set payment status", e),
    }
}
