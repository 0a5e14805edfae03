//! toronto-time-log server entry point.
//!
//! Reads configuration, opens the database pool, and starts the Axum
//! HTTP server.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use toronto_time_log::app_state::AppState;
use toronto_time_log::config::ServiceConfig;
use toronto_time_log::domain::{SystemClock, ZonedClock};
use toronto_time_log::persistence::{MemoryTimeLog, PostgresTimeLog, TimeRecordStore};
use toronto_time_log::service::TimeLogService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = ServiceConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("invalid configuration")?;
    tracing::info!(addr = %config.listen_addr, zone = %config.time_zone, "starting toronto-time-log");

    // Build persistence layer
    let store: Arc<dyn TimeRecordStore> = if config.persistence_enabled {
        let postgres = PostgresTimeLog::connect(&config)
            .await
            .with_context(|| format!("connecting to database at {}", config.redacted_target()))?;
        tracing::info!(target_db = %config.redacted_target(), "connected to database");

        if config.run_migrations {
            postgres.migrate().await.context("running migrations")?;
            tracing::info!("migrations applied");
        }
        Arc::new(postgres)
    } else {
        tracing::warn!("persistence disabled, recorded times are kept in memory only");
        Arc::new(MemoryTimeLog::new())
    };

    // Build service layer
    let clock = ZonedClock::new(Arc::new(SystemClock), config.time_zone.clone());
    let app_state = AppState::new(TimeLogService::new(store, clock));

    // Start server
    let app = toronto_time_log::app(app_state);
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
