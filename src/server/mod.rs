//! HTTP server
//!
//! Serves one freshly collected snapshot per request at `GET /gpu`
//! (also mounted under `/api`). A failed collection still returns the
//! snapshot body, with status 500.

use crate::config::ServerConfig;
use crate::domain::TelemetrySnapshot;
use crate::error::AppError;
use crate::probe::CommandRunner;
use crate::services::Collector;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Build the application router around a shared collector
pub fn create_router<R: CommandRunner + 'static>(collector: Arc<Collector<R>>) -> Router {
    let routes = Router::new()
        .route("/gpu", get(get_gpu::<R>))
        .route("/health", get(health));

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
        .with_state(collector)
}

/// Bind and serve until Ctrl-C
pub async fn serve<R: CommandRunner + 'static>(
    config: &ServerConfig,
    collector: Arc<Collector<R>>,
) -> Result<(), AppError> {
    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Server(format!("failed to bind {}: {}", addr, e)))?;

    log::info!("Serving GPU telemetry on http://{}/gpu", addr);

    axum::serve(listener, create_router(collector))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

async fn get_gpu<R: CommandRunner + 'static>(
    State(collector): State<Arc<Collector<R>>>,
) -> (StatusCode, Json<TelemetrySnapshot>) {
    let snapshot = collector.collect().await;
    let status = if snapshot.is_failure() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    (status, Json(snapshot))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
