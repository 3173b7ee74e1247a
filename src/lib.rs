//! Buggy Race Editor
//!
//! A small web application for configuring a single racing buggy. Component
//! prices are scraped from the race server's specifications page and the
//! buggy is stored in a local SQLite database.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod web;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::application::{AppState, BuggyService};
use crate::infrastructure::{logging, AppConfig, DatabaseConnection, RaceServerCatalog, SqliteBuggyRepository};

/// Wire the application together from configuration
pub async fn build_state(config: AppConfig) -> Result<AppState> {
    let db = DatabaseConnection::from_config(&config.database)
        .await
        .context("Failed to open database")?;
    db.migrate().await.context("Failed to prepare database schema")?;

    let repository = Arc::new(SqliteBuggyRepository::new(db.pool().clone()));
    let catalog = Arc::new(RaceServerCatalog::from_config(&config.catalog)?);

    Ok(AppState::new(config, BuggyService::new(repository, catalog)))
}

/// Fetch the catalog once at start-up so problems show in the log early
async fn log_startup_catalog(buggies: &BuggyService) {
    match buggies.cost_catalog().await {
        Ok(costs) => {
            info!("Race server catalog has {} items", costs.len());
            for (item, cost) in costs.iter() {
                info!("  {} = {}", item, cost);
            }
        }
        Err(e) => warn!("Race server catalog unavailable at start-up: {}", e),
    }
}

/// Start the editor and serve until Ctrl-C
pub async fn run(config: AppConfig) -> Result<()> {
    logging::init_logging_with_config(&config.logging)?;
    logging::log_system_info();

    let address = config.bind_address();
    let state = build_state(config).await?;
    log_startup_catalog(&state.buggies).await;

    let app = web::router(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("🚀 Buggy Race Editor listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
