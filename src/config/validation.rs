//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the backend URL can be turned into a proxy target
//! - Validate value ranges (timeouts > 0, paths absolute)
//! - Reject an API prefix that would capture every path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::{Component, Path};

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::proxy::target::{ProxyTarget, TargetError};

/// A single semantic problem in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("backend_url: {0}")]
    Target(#[from] TargetError),

    #[error("health path {0:?} must start with '/'")]
    HealthPath(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("fallback document {0:?} must be a relative path inside the asset root")]
    FallbackDocument(String),

    #[error("cors origin {0:?} is not a valid header value")]
    CorsOrigin(String),

    #[error("metrics address {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = ProxyTarget::new(&config.upstream.backend_url, &config.upstream.api_prefix) {
        errors.push(e.into());
    }

    if !config.health.path.starts_with('/') {
        errors.push(ValidationError::HealthPath(config.health.path.clone()));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_secs"));
    }

    if !is_contained(Path::new(&config.assets.fallback_document)) {
        errors.push(ValidationError::FallbackDocument(
            config.assets.fallback_document.clone(),
        ));
    }

    if let Some(origin) = &config.cors.allow_origin {
        if HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::CorsOrigin(origin.clone()));
        }
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::MetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// True when the path only descends (no root, no `..`) and names something.
fn is_contained(path: &Path) -> bool {
    let mut normals = 0;
    for component in path.components() {
        match component {
            Component::Normal(_) => normals += 1,
            Component::CurDir => {}
            _ => return false,
        }
    }
    normals > 0
}
