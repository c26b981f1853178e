//! # REST API for Step Submissions
//!
//! Endpoints for logging, editing, deleting and listing daily submissions.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use log::info;

use crate::backend::domain::commands::submissions::DeleteSubmissionCommand;
use crate::backend::io::rest::errors::{error_response, json_body};
use crate::backend::io::rest::mappers::SubmissionMapper;
use crate::backend::AppState;
use shared::{
    DeleteSubmissionResponse, EditStepsRequest, EditStepsResponse, SubmissionListRequest,
    SubmitStepsRequest, SubmitStepsResponse,
};

/// Create a router for submission related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_submissions).post(submit_steps))
        .route("/:id", put(edit_steps).delete(delete_submission))
}

/// Log steps for one participant and day
pub async fn submit_steps(
    State(state): State<AppState>,
    payload: Result<Json<SubmitStepsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match json_body(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!("POST /api/submissions - request: {:?}", request);

    let command = SubmissionMapper::to_submit_command(request);
    match state.submission_service.submit_steps(command) {
        Ok(result) => {
            let aggregator = state.submission_service.aggregator();
            let response = SubmitStepsResponse {
                submission: SubmissionMapper::to_dto(result.submission, aggregator),
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("Failed to submit steps", e),
    }
}

/// Tracker table: filtered submissions plus totals
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(request): Query<SubmissionListRequest>,
) -> impl IntoResponse {
    info!("GET /api/submissions - filters: {:?}", request);

    let query = SubmissionMapper::to_list_query(request);
    match state.submission_service.list_submissions(query) {
        Ok(result) => {
            let aggregator = state.submission_service.aggregator();
            let response = SubmissionMapper::to_list_response(result, aggregator);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("Failed to list submissions", e),
    }
}

/// Correct the step count of an existing submission
pub async fn edit_steps(
    State(state): State<AppState>,
    Path(submission_id): Path<u64>,
    payload: Result<Json<EditStepsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match json_body(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!("PUT /api/submissions/{} - request: {:?}", submission_id, request);

    let command = SubmissionMapper::to_edit_command(submission_id, request);
    match state.submission_service.edit_steps(command) {
        Ok(result) => {
            let aggregator = state.submission_service.aggregator();
            let response = EditStepsResponse {
                submission: SubmissionMapper::to_dto(result.submission, aggregator),
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("Failed to edit submission", e),
    }
}

pub async fn delete_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<u64>,
) -> impl IntoResponse {
    info!("DELETE /api/submissions/{}", submission_id);

    match state
        .submission_service
        .delete_submission(DeleteSubmissionCommand { submission_id })
    {
        Ok(result) => {
            let response = DeleteSubmissionResponse {
                deleted_id: result.submission.id,
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("Failed to delete submission", e),
    }
}
