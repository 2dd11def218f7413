//! Health-check HTTP stub.
//!
//! Exposes `GET /health` only; it never reads the issues file.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::ServeConfig;

pub const HEALTHY_MESSAGE: &str = "Service is healthy";

#[derive(Debug, Clone)]
struct AppState {
    service: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub data: HealthData,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthData {
    pub status: String,
    pub service: String,
}

pub fn create_router(service: impl Into<String>) -> Router {
    Router::new()
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState {
            service: service.into(),
        })
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            success: true,
            data: HealthData {
                status: "healthy".to_string(),
                service: state.service,
            },
            message: HEALTHY_MESSAGE.to_string(),
        }),
    )
}

/// Bind and serve until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &ServeConfig) -> anyhow::Result<()> {
    let app = create_router(config.service.clone());
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Health service listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
