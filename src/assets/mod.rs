//! Static asset serving with single-page-app fallback.
//!
//! # Data Flow
//! ```text
//! Static request
//!     → security::traversal (lexical check on the decoded path)
//!     → canonical check (symlinks must resolve inside the root)
//!     → ServeDir (file, content type from extension)
//!     → ServeFile fallback (index document, 200) when nothing matched
//! ```
//!
//! # Design Decisions
//! - The fallback keeps its own 200 status so client-side routes load normally
//! - Traversal attempts are answered 403 and logged on the `security` target
//! - Only GET and HEAD are served; other methods get 405
//! - A directory without trailing slash redirects (307) to `dir/`, as
//!   `express.static` does

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::AssetConfig;
use crate::security::traversal::{relative_asset_path, TraversalError};

/// File service over the asset root.
#[derive(Clone)]
pub struct StaticAssets {
    root: PathBuf,
    fallback: PathBuf,
    service: ServeDir<ServeFile>,
}

impl StaticAssets {
    pub fn new(config: &AssetConfig) -> Self {
        // Canonical form lets symlink targets be compared against the root.
        // A root that does not exist yet is still made absolute.
        let root = std::fs::canonicalize(&config.root)
            .or_else(|_| std::path::absolute(&config.root))
            .unwrap_or_else(|_| config.root.clone());
        let fallback = root.join(&config.fallback_document);

        let service = ServeDir::new(&root)
            .append_index_html_on_directories(true)
            .fallback(ServeFile::new(&fallback));

        Self {
            root,
            fallback,
            service,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document served for unmatched routes.
    pub fn fallback_document(&self) -> &Path {
        &self.fallback
    }

    /// Serve a file, the fallback document, or a rejection.
    pub async fn serve(&self, request: Request<Body>) -> Response {
        let path = request.uri().path();

        let relative = match relative_asset_path(path) {
            Ok(relative) => relative,
            // Cannot name a file on disk; ServeDir answers with the fallback.
            Err(TraversalError::NotUtf8) => return self.serve_file(request).await,
            Err(e) => {
                tracing::warn!(
                    target: "security",
                    path = %path,
                    reason = %e,
                    "Path traversal attempt rejected"
                );
                return StatusCode::FORBIDDEN.into_response();
            }
        };

        if self.escapes_root(&relative).await {
            tracing::warn!(
                target: "security",
                path = %path,
                "Asset resolves outside the asset root"
            );
            return StatusCode::FORBIDDEN.into_response();
        }

        self.serve_file(request).await
    }

    async fn serve_file(&self, request: Request<Body>) -> Response {
        match self.service.clone().oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        }
    }

    /// True when an existing entry under `relative` resolves outside the root.
    async fn escapes_root(&self, relative: &Path) -> bool {
        match tokio::fs::canonicalize(self.root.join(relative)).await {
            Ok(resolved) => !resolved.starts_with(&self.root),
            // Missing entries fall through to the fallback document.
            Err(_) => false,
        }
    }
}
