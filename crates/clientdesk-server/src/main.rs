//! ClientDesk Server - Main entry point

use anyhow::Result;
use clientdesk_common::logging::{init_logging, LogConfig};
use tracing::info;

use clientdesk_server::{
    api,
    config::{Config, StorageBackend},
    db, seed,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // `.env` may carry LOG_* settings, so load it before logging starts
    dotenvy::dotenv().ok();

    let log_config = LogConfig::builder()
        .log_file_prefix("clientdesk-server")
        .filter_directives("clientdesk_server=debug,tower_http=debug,sqlx=warn")
        .build();
    let log_config = log_config.merge_env()?;
    let _log_guard = init_logging(&log_config)?;

    info!("Starting ClientDesk Server");

    let config = Config::load()?;
    info!(
        storage = ?config.storage,
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let state = match config.storage {
        StorageBackend::Postgres => {
            let pool = db::create_pool(&config.database).await?;
            db::run_migrations(&pool).await?;
            AppState::postgres(pool, &config.auth)
        },
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage - data is lost on restart");
            AppState::in_memory(&config.auth)
        },
    };

    if config.seed.enabled {
        if let Err(e) = seed::seed_admin(state.users.as_ref(), &config.seed).await {
            tracing::error!(error = %e, "Admin seeding failed");
        }
    }

    api::serve(&config, state).await
}
