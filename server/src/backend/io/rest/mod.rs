//! # REST API Interface Layer
//!
//! HTTP endpoints for the steps challenge. Handlers only translate HTTP:
//! requests are mapped to domain commands, results are mapped back to the
//! DTOs in the `shared` crate, and errors are mapped to status codes in
//! [`errors`].
//!
//! ## Routes (all under `/api`)
//!
//! - `POST /submissions`, `GET /submissions?search=&date_from=&date_to=`
//! - `PUT /submissions/:id`, `DELETE /submissions/:id`
//! - `POST /participants/:name/paid/toggle`, `PUT /participants/:name/paid`
//! - `GET /summaries`, `GET /challenge`
//! - `POST /export/csv`, `POST /export/to-path`

pub mod errors;
pub mod export_apis;
pub mod mappers;
pub mod payment_apis;
pub mod submission_apis;
pub mod summary_apis;

#[cfg(test)]
pub mod test_utils;

use axum::Router;

use crate::backend::AppState;

/// All API routes, to be nested under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/submissions", submission_apis::router())
        .nest("/participants", payment_apis::router())
        .nest("/export", export_apis::router())
        .merge(summary_apis::router())
}
