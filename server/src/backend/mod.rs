//! # Backend Module
//!
//! All non-UI logic for the steps challenge tracker.
//!
//! ## Architecture
//!
//! ```text
//! Client (browser UI, scripts)
//!     ↓
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (record store, aggregator, services)
//!     ↓
//! Storage Layer (JSON snapshot)
//! ```
//!
//! This module wires the layers together: it loads the snapshot into the
//! shared record store, builds the services and the router, and runs the
//! daily reminder task.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use chrono::Local;
use log::info;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::backend::domain::reminder_service::CHECK_INTERVAL;
use crate::backend::domain::{
    Aggregator, ExportService, PaymentService, RecordStoreHandle, ReminderSchedule,
    ReminderService, SubmissionService, SummaryService,
};
use crate::backend::storage::{Connection, JsonConnection};
use crate::config::{AppConfig, ServerConfig};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub submission_service: SubmissionService<JsonConnection>,
    pub payment_service: PaymentService<JsonConnection>,
    pub summary_service: SummaryService<JsonConnection>,
    pub export_service: ExportService,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    let data_directory = config.data_directory();
    info!("Setting up storage in {}", data_directory.display());
    let connection = JsonConnection::new(&data_directory)?;

    info!("Loading submissions");
    let store = RecordStoreHandle::load(
        config.challenge.roster.clone(),
        connection.create_submission_repository(),
    )
    .with_context(|| {
        format!(
            "Failed to load submissions from {}",
            connection.submissions_file_path().display()
        )
    })?;
    let submission_count = store.read(|s| s.submissions().len())?;
    info!(
        "Loaded {} submissions for {} participants",
        submission_count,
        config.challenge.roster.len()
    );

    info!("Setting up domain model");
    let aggregator = Aggregator::from_rules(&config.challenge);
    let app_state = AppState {
        submission_service: SubmissionService::new(store.clone(), aggregator),
        payment_service: PaymentService::new(store.clone(), aggregator),
        summary_service: SummaryService::new(store, config.challenge.clone()),
        export_service: ExportService::new(),
    };

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, server: &ServerConfig) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    let cors = match &server.cors_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))?;
            cors.allow_origin(origin)
        }
        None => cors.allow_origin(Any),
    };

    let mut router = Router::new()
        .nest("/api", io::api_router())
        .with_state(app_state);

    if let Some(static_dir) = &server.static_dir {
        info!("Serving static files from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    Ok(router.layer(cors))
}

/// Start the once-a-day reminder. Returns `None` when reminders are disabled.
pub fn spawn_daily_reminder(schedule: ReminderSchedule) -> Result<Option<JoinHandle<()>>> {
    let mut service = ReminderService::new(schedule).context("Invalid reminder schedule")?;
    if !service.is_enabled() {
        info!("Daily reminder disabled");
        return Ok(None);
    }

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(CHECK_INTERVAL);
        loop {
            interval.tick().await;
            if let Some(reminder) = service.check_and_fire(Local::now().naive_local()) {
                info!("🔔 REMINDER: {} - {}", reminder.title, reminder.body);
            }
        }
    });

    Ok(Some(handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::io::rest::test_utils::TestApp;
    use axum::http::StatusCode;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_state_survives_restart() {
        let data_dir = TempDir::new().unwrap();
        let config = AppConfig {
            data_directory: Some(data_dir.path().to_path_buf()),
            ..AppConfig::default()
        };

        let state = initialize_backend(&config).unwrap();
        state
            .submission_service
            .submit_steps(crate::backend::domain::commands::submissions::SubmitStepsCommand {
                participant_name: Some("Joy".to_string()),
                date: Some("2024-02-01".to_string()),
                steps: Some("10500".to_string()),
                proof_reference: None,
            })
            .unwrap();
        drop(state);

        let reloaded = initialize_backend(&config).unwrap();
        let submissions = reloaded
            .submission_service
            .list_submissions(Default::default())
            .unwrap()
            .submissions;
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].participant_name, "Joy");
        assert!(data_dir.path().join("submissions.json").exists());
    }

    #[test]
    fn test_malformed_snapshot_fails_startup() {
        let data_dir = TempDir::new().unwrap();
        fs::write(data_dir.path().join("submissions.json"), "{ not json").unwrap();
        let config = AppConfig {
            data_directory: Some(data_dir.path().to_path_buf()),
            ..AppConfig::default()
        };

        assert!(initialize_backend(&config).is_err());
    }

    #[test]
    fn test_invalid_cors_origin() {
        let data_dir = TempDir::new().unwrap();
        let config = AppConfig {
            data_directory: Some(data_dir.path().to_path_buf()),
            server: ServerConfig {
                cors_origin: Some("bad\norigin".to_string()),
                ..ServerConfig::default()
            },
            ..AppConfig::default()
        };
        let state = initialize_backend(&config).unwrap();
        assert!(create_router(state, &config.server).is_err());
    }

    #[tokio::test]
    async fn test_static_dir_fallback() {
        let static_dir = TempDir::new().unwrap();
        fs::write(static_dir.path().join("index.html"), "<h1>Steps</h1>").unwrap();

        let data_dir = TempDir::new().unwrap();
        let config = AppConfig {
            data_directory: Some(data_dir.path().to_path_buf()),
            server: ServerConfig {
                static_dir: Some(static_dir.path().to_path_buf()),
                ..ServerConfig::default()
            },
            ..AppConfig::default()
        };
        let state = initialize_backend(&config).unwrap();
        let router = create_router(state, &config.server).unwrap();

        let app = TestApp { router, data_dir };
        let (status, _) = app
            .request(axum::http::Method::GET, "/index.html", None)
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app
            .request(axum::http::Method::GET, "/api/challenge", None)
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_disabled_reminder_is_not_spawned() {
        let schedule = ReminderSchedule {
            enabled: false,
            ..ReminderSchedule::default()
        };
        assert!(spawn_daily_reminder(schedule).unwrap().is_none());

        let handle = spawn_daily_reminder(ReminderSchedule::default())
            .unwrap()
            .unwrap();
        handle.abort();
    }
}
