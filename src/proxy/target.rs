//! Upstream target and path rewriting.
//!
//! A `ProxyTarget` is built once at startup from `BACKEND_URL` and
//! `API_PREFIX` and is read-only afterwards.

use axum::http::uri::{Authority, InvalidUri, PathAndQuery, Scheme};
use axum::http::{HeaderValue, Uri};
use thiserror::Error;
use url::Url;

/// Error building a [`ProxyTarget`].
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unsupported scheme {0:?}, only http is forwarded")]
    UnsupportedScheme(String),

    #[error("url has no host")]
    MissingHost,

    #[error("invalid authority: {0}")]
    Authority(#[from] InvalidUri),

    #[error("api prefix {0:?} must start with '/' and name at least one segment")]
    InvalidPrefix(String),
}

/// Where proxied requests go, and which prefix is removed on the way.
#[derive(Debug, Clone)]
pub struct ProxyTarget {
    authority: Authority,
    host_header: HeaderValue,
    /// Path of the base URL without trailing slash ("" for a bare origin).
    base_path: String,
    /// Normalized prefix without trailing slash.
    strip_prefix: String,
}

impl ProxyTarget {
    pub fn new(backend_url: &str, api_prefix: &str) -> Result<Self, TargetError> {
        let url = Url::parse(backend_url)?;
        if url.scheme() != "http" {
            return Err(TargetError::UnsupportedScheme(url.scheme().to_string()));
        }
        let host = url.host_str().ok_or(TargetError::MissingHost)?;
        let port = url.port_or_known_default().unwrap_or(80);

        let authority: Authority = format!("{host}:{port}").parse()?;
        let host_header = HeaderValue::from_str(authority.as_str())
            .map_err(|_| TargetError::MissingHost)?;

        Ok(Self {
            authority,
            host_header,
            base_path: url.path().trim_end_matches('/').to_string(),
            strip_prefix: normalize_prefix(api_prefix)?,
        })
    }

    /// The prefix selecting proxied requests, e.g. `/api`.
    pub fn strip_prefix(&self) -> &str {
        &self.strip_prefix
    }

    /// `host:port` sent as the outbound `Host` header.
    pub fn host_header(&self) -> &HeaderValue {
        &self.host_header
    }

    /// Base URL as configured, normalized (`http://host:port/base`).
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.authority, self.base_path)
    }

    /// Path with the prefix removed; an empty remainder becomes `/`.
    ///
    /// Paths that do not carry the prefix are returned unchanged.
    pub fn rewrite_path<'a>(&self, path: &'a str) -> &'a str {
        match path.strip_prefix(self.strip_prefix.as_str()) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => path,
        }
    }

    /// Absolute URI the inbound request is forwarded to, query preserved.
    pub fn outbound_uri(&self, inbound: &Uri) -> Result<Uri, axum::http::Error> {
        let path = self.rewrite_path(inbound.path());
        let path_and_query = match inbound.query() {
            Some(query) => format!("{}{}?{}", self.base_path, path, query),
            None => format!("{}{}", self.base_path, path),
        };

        Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(PathAndQuery::try_from(path_and_query)?)
            .build()
    }
}

fn normalize_prefix(prefix: &str) -> Result<String, TargetError> {
    let trimmed = prefix.trim_end_matches('/');
    if !prefix.starts_with('/') || trimmed.is_empty() || trimmed.contains(['?', '#']) {
        return Err(TargetError::InvalidPrefix(prefix.to_string()));
    }
    Ok(trimmed.to_string())
}
