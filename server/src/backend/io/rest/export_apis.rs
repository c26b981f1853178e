//! # REST API for Data Export
//!
//! Endpoints for exporting the payment summary as CSV.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::info;

use crate::backend::io::rest::errors::{error_response, json_body};
use crate::backend::io::rest::mappers::ExportMapper;
use crate::backend::AppState;
use shared::ExportToPathRequest;

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/csv", post(export_summary_csv))
        .route("/to-path", post(export_to_path))
}

/// Export the payment summary as CSV data
pub async fn export_summary_csv(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/export/csv");

    match state
        .export_service
        .export_summary_csv(&state.summary_service)
    {
        Ok(result) => {
            info!("✅ Export CSV operation completed successfully");
            (StatusCode::OK, Json(ExportMapper::to_data_response(result))).into_response()
        }
        Err(e) => error_response("Failed to export summary", e),
    }
}

/// Export the summary directly to a directory (or the default location)
pub async fn export_to_path(
    State(state): State<AppState>,
    payload: Result<Json<ExportToPathRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match json_body(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!("POST /api/export/to-path - custom_path: {:?}", request.custom_path);

    match state.export_service.export_to_path(
        ExportMapper::to_command(request),
        &state.summary_service,
    ) {
        Ok(result) => {
            info!("✅ Export to path operation completed: success={}", result.success);
            (StatusCode::OK, Json(ExportMapper::to_path_response(result))).into_response()
        }
        Err(e) => error_response("Failed to export to path", e),
    }
}
