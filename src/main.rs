//! Status gateway
//!
//! Serves a pre-built single-page frontend and forwards API calls to one
//! backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  GATEWAY                     │
//!   Client Request     │  ┌─────────┐   ┌──────────┐                  │
//!   ───────────────────┼─▶│ listener│──▶│  router  │                  │
//!                      │  └─────────┘   └────┬─────┘                  │
//!                      │        ┌────────────┼─────────────┐          │
//!                      │        ▼            ▼             ▼          │
//!                      │  ┌──────────┐ ┌──────────┐ ┌─────────────┐   │
//!                      │  │ liveness │ │  proxy   │ │ static + SPA│   │
//!                      │  │ /health  │ │ /api/*   │ │  fallback   │   │
//!                      │  └──────────┘ └────┬─────┘ └─────────────┘   │
//!                      └────────────────────┼─────────────────────────┘
//!                                           ▼
//!                                    Backend (BACKEND_URL)
//! ```

use std::process::ExitCode;

use clap::Parser;
use status_gateway::config::GatewayArgs;
use status_gateway::lifecycle::startup;
use status_gateway::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = GatewayArgs::parse();

    // Logging is configured by the config, so config errors go to stderr.
    let config = match args.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("status-gateway: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!("status-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    match startup::run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Gateway stopped with error");
            ExitCode::FAILURE
        }
    }
}
