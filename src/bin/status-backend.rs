//! Demo status backend for the gateway.

use std::process::ExitCode;

use clap::Parser;
use status_gateway::backend::{self, StatusBackendConfig};
use status_gateway::config::{LogFormat, ObservabilityConfig};
use status_gateway::lifecycle::signals;
use status_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "status-backend")]
#[command(about = "Status service forwarded to by the gateway", long_about = None)]
struct Cli {
    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Allowed CORS origin.
    #[arg(long, env = "CORS_ORIGIN", default_value = "*")]
    cors_origin: String,

    /// Reported environment name.
    #[arg(long, env = "APP_ENV", default_value = "development")]
    environment: String,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(&ObservabilityConfig {
        log_format: cli.log_format,
        ..Default::default()
    });

    let config = StatusBackendConfig {
        port: cli.port,
        cors_origin: cli.cors_origin,
        environment: cli.environment,
    };
    tracing::info!(cors_origin = %config.cors_origin, "Configuration loaded");

    let app = match backend::router(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Invalid CORS origin");
            return ExitCode::FAILURE;
        }
    };

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(port = config.port, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(port = config.port, "Backend started, ctrl+c to exit");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(signals::wait_for_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
