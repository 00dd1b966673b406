//! Request forwarding to the upstream.
//!
//! # Responsibilities
//! - Rebase the inbound request onto the target (prefix stripped, query kept)
//! - Replace `Host`, drop hop-by-hop headers, stream the body through
//! - Bound the wait for the upstream's response head
//! - Relay status, headers and streaming body back
//!
//! # Design Decisions
//! - Single attempt, no retries, no buffering of either body
//! - Dropping the returned future (client went away) drops the upstream call
//! - Connect failures are 502, an exceeded deadline is 504

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time;

use crate::config::TimeoutConfig;
use crate::proxy::error::ProxyError;
use crate::proxy::target::ProxyTarget;
use crate::security::headers::strip_hop_by_hop;

/// Forwards requests to one fixed upstream.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    target: Arc<ProxyTarget>,
    timeout: Duration,
}

impl Forwarder {
    pub fn new(target: ProxyTarget, timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            target: Arc::new(target),
            timeout: Duration::from_secs(timeouts.upstream_secs),
        }
    }

    pub fn target(&self) -> &ProxyTarget {
        &self.target
    }

    /// Forward one request and return the upstream's response unchanged.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, ProxyError> {
        let (parts, body) = request.into_parts();
        let uri = self.target.outbound_uri(&parts.uri)?;
        let url = uri.to_string();

        let mut headers = parts.headers;
        strip_hop_by_hop(&mut headers);
        headers.insert(header::HOST, self.target.host_header().clone());

        let mut outbound = Request::new(body);
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = uri;
        *outbound.headers_mut() = headers;

        tracing::info!(
            method = %outbound.method(),
            upstream = %url,
            "Proxying request"
        );

        let response = match time::timeout(self.timeout, self.client.request(outbound)).await {
            Ok(Ok(response)) => response,
            Ok(Err(source)) => {
                tracing::error!(upstream = %url, error = %source, "Upstream unreachable");
                return Err(ProxyError::UpstreamUnreachable { url, source });
            }
            Err(_) => {
                tracing::error!(
                    upstream = %url,
                    timeout = ?self.timeout,
                    "Upstream timed out"
                );
                return Err(ProxyError::UpstreamTimeout {
                    url,
                    timeout: self.timeout,
                });
            }
        };

        let (mut parts, body) = response.into_parts();
        strip_hop_by_hop(&mut parts.headers);

        tracing::debug!(upstream = %url, status = %parts.status, "Upstream responded");

        Ok(Response::from_parts(parts, Body::new(body)))
    }
}
