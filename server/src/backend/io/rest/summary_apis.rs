//! # REST API for Summaries
//!
//! Per-participant summaries, the grand total and the challenge rules.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;

use crate::backend::io::rest::errors::error_response;
use crate::backend::io::rest::mappers::SummaryMapper;
use crate::backend::AppState;

/// Create a router for summary related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summaries", get(get_summaries))
        .route("/challenge", get(get_challenge_info))
}

pub async fn get_summaries(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summaries");

    match state.summary_service.get_summaries() {
        Ok(result) => (StatusCode::OK, Json(SummaryMapper::to_summary_response(result))).into_response(),
        Err(e) => error_response("Failed to compute summaries", e),
    }
}

pub async fn get_challenge_info(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/challenge");

    let response = SummaryMapper::to_challenge_response(state.summary_service.challenge_info());
    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use crate::backend::io::rest::test_utils::TestApp;
    use axum::http::{Method, StatusCode};
    use shared::{ChallengeInfoResponse, SummaryResponse};

    #[tokio::test]
    async fn test_summaries_include_every_roster_name() {
        let app = TestApp::new();
        app.submit("A", "2024-01-01", "12000").await;
        app.submit("A", "2024-01-02", "5000").await;

        let (status, body) = app.request(Method::GET, "/api/summaries", None).await;
        assert_eq!(status, StatusCode::OK);

        let response: SummaryResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.summaries.len(), 2);
        assert_eq!(response.summaries[0].name, "A");
        assert_eq!(response.summaries[0].total_submissions, 2);
        assert_eq!(response.summaries[0].days_missed, 1);
        assert_eq!(response.summaries[0].total_owed, 50);
        assert_eq!(response.summaries[0].completion_rate, 50.0);
        assert_eq!(response.summaries[1].name, "B");
        assert_eq!(response.summaries[1].total_submissions, 0);
        assert_eq!(response.grand_total, 50);
        assert_eq!(response.currency_symbol, "₱");
    }

    #[tokio::test]
    async fn test_challenge_info() {
        let app = TestApp::new();

        let (status, body) = app.request(Method::GET, "/api/challenge", None).await;
        assert_eq!(status, StatusCode::OK);

        let response: ChallengeInfoResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.participants, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(response.target_steps, 10_000);
        assert_eq!(response.penalty_amount, 50);
    }
}
