use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

use crate::backend::domain::models::challenge::ChallengeRules;
use crate::backend::{create_router, initialize_backend};
use crate::config::AppConfig;

/// Full router over a temporary data directory, roster `[A, B]`.
pub struct TestApp {
    pub router: Router,
    pub data_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let data_dir = TempDir::new().expect("Failed to create temp directory");
        let config = AppConfig {
            data_directory: Some(data_dir.path().to_path_buf()),
            challenge: ChallengeRules {
                roster: vec!["A".to_string(), "B".to_string()],
                ..ChallengeRules::default()
            },
            ..AppConfig::default()
        };
        let app_state = initialize_backend(&config).expect("Failed to initialize backend");
        let router = create_router(app_state, &config.server).expect("Failed to build router");

        Self { router, data_dir }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn submit(&self, name: &str, date: &str, steps: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/submissions",
            Some(serde_json::json!({
                "participant_name": name,
                "date": date,
                "steps": steps,
            })),
        )
        .await
    }
}
