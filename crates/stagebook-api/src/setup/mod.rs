//! Application setup and initialization
//!
//! All initialization logic lives here, extracted from main.rs: telemetry,
//! database pool and migrations, upload store, mailer, and routes.

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};

use stagebook_core::Config;
use stagebook_db::{BookingRepository, UserRepository};
use stagebook_storage::TempStore;

use crate::services::email::Mailer;
use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup the staging directory for uploads
    let temp_store = TempStore::new(&config.upload_dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize upload store: {}", e))?;

    // Setup the SMTP mailer
    let mailer = Mailer::from_config(&config).context("Failed to initialize mailer")?;

    let state = Arc::new(AppState {
        users: UserRepository::new(pool.clone()),
        bookings: BookingRepository::new(pool.clone()),
        pool,
        temp_store: Arc::new(temp_store),
        mailer,
        config: config.clone(),
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
