use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use steps_challenge_server::backend::{create_router, initialize_backend, spawn_daily_reminder};
use steps_challenge_server::config::AppConfig;

/// 10K Steps Challenge tracker server
#[derive(Parser, Debug)]
#[command(name = "steps-challenge-server")]
#[command(about = "REST backend for the 10K Steps Challenge tracker")]
struct Args {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides `server.bind_address`
    #[arg(long)]
    bind: Option<String>,

    /// Directory holding submissions.json, overrides `data_directory`
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_overrides(args.bind, args.data_dir);

    let app_state = initialize_backend(&config).context("Failed to initialize backend")?;
    let app = create_router(app_state, &config.server)?;

    if spawn_daily_reminder(config.reminder.clone())?.is_some() {
        info!(
            "Daily reminder scheduled at {:02}:{:02}",
            config.reminder.hour, config.reminder.minute
        );
    }

    let listener = TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;
    info!("🚀 Steps challenge server listening on {}", config.server.bind_address);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
