//! # Restaurant Voting
//!
//! Lunch-voting service entry point. Initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Storage (database pool and migrations, or in-memory)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use restaurant_voting::config::Settings;
use restaurant_voting::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    restaurant_voting::telemetry::init_tracing();

    info!("Starting Restaurant Voting service...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        backend = ?settings.database.backend,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
