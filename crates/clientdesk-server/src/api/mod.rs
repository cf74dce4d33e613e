//! Router assembly, health endpoint and the HTTP server loop

pub mod response;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::audit;
use crate::config::{Config, CorsConfig};
use crate::db;
use crate::error::{AppError, AppResult};
use crate::features::{auth, clients};
use crate::middleware;
use crate::state::{AppState, Backend};
use response::ApiResponse;

/// Build the application router with all routes and middleware
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let api = Router::new()
        .nest("/auth", auth::auth_routes())
        .nest("/clients", clients::clients_routes())
        .nest("/audits", audit::audit_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(cors))
}

/// `{ status, database }`; 503 when the database is unreachable
async fn health(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let database = match &state.backend {
        Backend::Postgres(pool) => {
            db::health_check(pool).await.map_err(|e| {
                tracing::error!(error = %e, "Database health check failed");
                AppError::Unavailable("Database is unreachable".to_string())
            })?;
            "connected"
        },
        Backend::Memory => "memory",
    };

    Ok(ApiResponse::success(json!({
        "status": "healthy",
        "database": database,
    })))
}

/// Bind and serve until a shutdown signal arrives
pub async fn serve(config: &Config, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => info!("Received terminate signal, starting graceful shutdown"),
    }

    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
