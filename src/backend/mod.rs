//! Demo status backend.
//!
//! The service the gateway forwards `/api/*` to in the two-tier demo. Every
//! GET answers with the process identity and the current time; `/health`
//! reports liveness. CORS headers let a browser call it directly too.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::InvalidHeaderValue, Method, Uri},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::health;
use crate::security::cors::cors_layer;

/// Settings for the status backend.
#[derive(Debug, Clone)]
pub struct StatusBackendConfig {
    pub port: u16,
    pub cors_origin: String,
    pub environment: String,
}

impl Default for StatusBackendConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cors_origin: "*".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Body of every status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub id: String,
    pub message: String,
    pub timestamp: String,
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub port: u16,
    pub environment: String,
}

struct BackendState {
    id: Uuid,
    port: u16,
    environment: String,
}

/// Build the backend's router. The instance ID is fixed for the router's lifetime.
pub fn router(config: &StatusBackendConfig) -> Result<Router, InvalidHeaderValue> {
    let state = Arc::new(BackendState {
        id: Uuid::new_v4(),
        port: config.port,
        environment: config.environment.clone(),
    });

    Ok(Router::new()
        .route("/health", get(health::liveness))
        .route("/", get(status))
        .route("/{*path}", get(status))
        .with_state(state)
        .layer(cors_layer(&config.cors_origin, Method::GET.into())?))
}

async fn status(State(state): State<Arc<BackendState>>, uri: Uri) -> Json<StatusPayload> {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    tracing::info!(path = %uri.path(), timestamp = %timestamp, "GET");

    Json(StatusPayload {
        id: state.id.to_string(),
        message: "Backend connection successful!".to_string(),
        timestamp,
        server_info: ServerInfo {
            port: state.port,
            environment: state.environment.clone(),
        },
    })
}
