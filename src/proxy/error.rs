//! Per-request proxy failures and their HTTP mapping.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure forwarding one request. Never fatal to the process.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Connection refused, DNS failure, connect timeout, reset before a response.
    #[error("upstream {url} unreachable: {source}")]
    UpstreamUnreachable {
        url: String,
        #[source]
        source: hyper_util::client::legacy::Error,
    },

    /// No response head within the configured upstream timeout.
    #[error("upstream {url} did not respond within {timeout:?}")]
    UpstreamTimeout { url: String, timeout: Duration },

    /// The rewritten URI could not be built.
    #[error("cannot build upstream uri: {0}")]
    InvalidUri(#[from] axum::http::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::UpstreamUnreachable { .. } | ProxyError::InvalidUri(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::UpstreamUnreachable { .. } => "unreachable",
            ProxyError::UpstreamTimeout { .. } => "timeout",
            ProxyError::InvalidUri(_) => "invalid_uri",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        // Internal details stay in the logs.
        let status = self.status();
        (status, status.canonical_reason().unwrap_or("Upstream error")).into_response()
    }
}
