//! Command line and environment layer.
//!
//! Precedence: flag or environment variable, then the TOML file named by
//! `--config`/`GATEWAY_CONFIG`, then built-in defaults.

use clap::Parser;
use std::path::PathBuf;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::{GatewayConfig, LogFormat};
use crate::config::validation::validate_config;

#[derive(Debug, Default, Parser)]
#[command(name = "status-gateway")]
#[command(about = "Serves the frontend build and forwards API calls to the backend", long_about = None)]
pub struct GatewayArgs {
    /// TOML configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend base URL.
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Interface to listen on.
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Prefix forwarded to the backend (and stripped).
    #[arg(long, env = "API_PREFIX")]
    pub api_prefix: Option<String>,

    /// Directory with the frontend build.
    #[arg(long, env = "ASSET_ROOT")]
    pub asset_root: Option<PathBuf>,

    /// Document served for unmatched routes, relative to the asset root.
    #[arg(long, env = "FALLBACK_DOCUMENT")]
    pub fallback_document: Option<String>,

    /// Liveness endpoint path.
    #[arg(long, env = "HEALTH_PATH")]
    pub health_path: Option<String>,

    /// Seconds to wait for the backend before answering 504.
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout_secs: Option<u64>,

    /// Origin allowed by CORS ("*" for any). No CORS headers when unset.
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,

    /// Bind address for the Prometheus exporter.
    #[arg(long, env = "METRICS_ADDRESS")]
    pub metrics_address: Option<String>,
}

impl GatewayArgs {
    /// Resolve the final, validated configuration.
    pub fn load(&self) -> Result<GatewayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GatewayConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    /// Overlay every value given on the command line or in the environment.
    pub fn apply(&self, config: &mut GatewayConfig) {
        if let Some(url) = &self.backend_url {
            config.upstream.backend_url = url.clone();
        }
        if let Some(host) = &self.host {
            config.listener.host = host.clone();
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(prefix) = &self.api_prefix {
            config.upstream.api_prefix = prefix.clone();
        }
        if let Some(root) = &self.asset_root {
            config.assets.root = root.clone();
        }
        if let Some(document) = &self.fallback_document {
            config.assets.fallback_document = document.clone();
        }
        if let Some(path) = &self.health_path {
            config.health.path = path.clone();
        }
        if let Some(secs) = self.upstream_timeout_secs {
            config.timeouts.upstream_secs = secs;
        }
        if let Some(origin) = &self.cors_origin {
            config.cors.allow_origin = Some(origin.clone());
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
        if let Some(addr) = &self.metrics_address {
            config.observability.metrics_address = Some(addr.clone());
        }
    }
}
