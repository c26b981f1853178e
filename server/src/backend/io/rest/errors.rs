//! Translation of domain failures into HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, warn};

use crate::backend::domain::models::submission::SubmissionError;
use shared::ErrorResponse;

/// Status code for a service error. Anything that is not a
/// [`SubmissionError`] is an internal failure (storage, I/O).
pub fn status_for(e: &anyhow::Error) -> StatusCode {
    match e.downcast_ref::<SubmissionError>() {
        Some(SubmissionError::Validation(_)) => StatusCode::BAD_REQUEST,
        Some(SubmissionError::DuplicateEntry { .. }) => StatusCode::CONFLICT,
        Some(SubmissionError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(SubmissionError::InvalidValue(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log the failure and build the `{ "error": ... }` response.
pub fn error_response(context: &str, e: anyhow::Error) -> Response {
    let status = status_for(&e);
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("❌ {}: {:#}", context, e);
        format!("{}: {}", context, e)
    } else {
        warn!("{}: {}", context, e);
        e.to_string()
    };

    (status, Json(ErrorResponse { error: message })).into_response()
}

/// Unwrap a JSON body, or build the `{ "error": ... }` response for a body
/// that could not be read or deserialized.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let message = rejection.body_text();
            warn!("Rejected request body: {}", message);
            Err((rejection.status(), Json(ErrorResponse { error: message })).into_response())
        }
    }
}
