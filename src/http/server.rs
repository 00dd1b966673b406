//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single dispatch handler
//! - Wire up middleware (request ID, tracing)
//! - Add CORS headers to liveness and static responses when configured;
//!   proxied responses carry whatever CORS headers the upstream sends
//! - Dispatch requests to liveness, proxy or static handlers
//! - Serve on a bound listener until shutdown

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::{service_fn, Layer, ServiceExt};
use tower_http::cors::{AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::assets::StaticAssets;
use crate::config::{ConfigError, GatewayConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::health;
use crate::http::request::{make_span, request_id_layer};
use crate::observability::metrics;
use crate::proxy::{Forwarder, ProxyTarget};
use crate::routing::{Route, Router as GatewayRouter};
use crate::security::cors::cors_layer;

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<GatewayRouter>,
    pub forwarder: Forwarder,
    pub assets: StaticAssets,
    /// Applied to liveness and static responses only.
    pub cors: Option<CorsLayer>,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
    assets: StaticAssets,
}

impl GatewayServer {
    /// Build the server. The configuration is validated again here, so a
    /// `GatewayServer` only exists for a usable configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let target = ProxyTarget::new(&config.upstream.backend_url, &config.upstream.api_prefix)
            .map_err(|e| ConfigError::Validation(vec![e.into()]))?;
        let router = Arc::new(GatewayRouter::new(&config.health.path, target.strip_prefix()));
        let forwarder = Forwarder::new(target, &config.timeouts);
        let assets = StaticAssets::new(&config.assets);

        let cors = match &config.cors.allow_origin {
            Some(origin) => Some(cors_layer(origin, AllowMethods::any()).map_err(|_| {
                ConfigError::Validation(vec![ValidationError::CorsOrigin(origin.clone())])
            })?),
            None => None,
        };

        let state = AppState {
            router,
            forwarder,
            assets: assets.clone(),
            cors,
        };

        let router = Self::build_router(state);
        Ok(Self {
            router,
            config,
            assets,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TraceLayer::new_for_http().make_span_with(make_span::<Body>))
            .layer(request_id_layer())
    }

    /// The assembled application, for in-process use (tests, embedding).
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;

        if !self.assets.fallback_document().is_file() {
            tracing::warn!(
                fallback = %self.assets.fallback_document().display(),
                "Fallback document missing; unmatched routes will answer 404"
            );
        }

        tracing::info!(
            address = %addr,
            backend = %self.config.upstream.backend_url,
            api_prefix = %self.config.upstream.api_prefix,
            asset_root = %self.assets.root().display(),
            "Gateway listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point: route, then hand to exactly one handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let route = state.router.match_request(&request);
    let method = request.method().clone();

    tracing::debug!(route = %route, "Dispatching request");

    let response = match route {
        Route::Proxy => match state.forwarder.forward(request).await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_upstream_error(e.kind());
                e.into_response()
            }
        },
        local => serve_local(&state, local, request).await,
    };

    metrics::record_request(route, method.as_str(), response.status().as_u16(), start);
    response
}

/// Liveness and static responses, wrapped in the CORS layer when configured.
async fn serve_local(state: &AppState, route: Route, request: Request<Body>) -> Response {
    let handler = {
        let state = state.clone();
        service_fn(move |request: Request<Body>| {
            let state = state.clone();
            async move {
                let response = match route {
                    Route::Liveness => health::liveness().await.into_response(),
                    _ => state.assets.serve(request).await,
                };
                Ok::<_, Infallible>(response)
            }
        })
    };

    let result = match &state.cors {
        Some(cors) => cors.layer(handler).oneshot(request).await,
        None => handler.oneshot(request).await,
    };
    match result {
        Ok(response) => response,
        Err(never) => match never {},
    }
}
