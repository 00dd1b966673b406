//! Route lookup and dispatch decision.
//!
//! # Responsibilities
//! - Decide which handler owns a request
//! - Liveness first, then the API prefix, then static assets
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Total: every request maps to exactly one route
//! - Explicit enum rather than handler closures, so the decision is testable

use std::fmt;

use axum::http::Request;

use crate::routing::matcher::{ExactPathMatcher, Matcher, PathPrefixMatcher};

/// Handler that owns a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Liveness,
    Proxy,
    Static,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Liveness => "liveness",
            Route::Proxy => "proxy",
            Route::Static => "static",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled routing table.
#[derive(Debug)]
pub struct Router {
    liveness: ExactPathMatcher,
    api: PathPrefixMatcher,
}

impl Router {
    pub fn new(health_path: &str, api_prefix: &str) -> Self {
        Self {
            liveness: ExactPathMatcher::new(health_path),
            api: PathPrefixMatcher::new(api_prefix),
        }
    }

    /// Route a request path.
    pub fn route(&self, path: &str) -> Route {
        if self.liveness.matches(path) {
            Route::Liveness
        } else if self.api.matches(path) {
            Route::Proxy
        } else {
            Route::Static
        }
    }

    /// Route a full request. Only the path takes part in the decision;
    /// method restrictions are enforced by the chosen handler.
    pub fn match_request<B>(&self, req: &Request<B>) -> Route {
        self.route(req.uri().path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::new("/health", "/api")
    }

    #[test]
    fn routes_each_kind() {
        let r = router();
        assert_eq!(r.route("/health"), Route::Liveness);
        assert_eq!(r.route("/api"), Route::Proxy);
        assert_eq!(r.route("/api/status"), Route::Proxy);
        assert_eq!(r.route("/"), Route::Static);
        assert_eq!(r.route("/apix"), Route::Static);
        assert_eq!(r.route("/some/client/route"), Route::Static);
    }

    #[test]
    fn liveness_wins_over_overlapping_prefix() {
        let r = Router::new("/api/health", "/api");
        assert_eq!(r.route("/api/health"), Route::Liveness);
        assert_eq!(r.route("/api/healthz"), Route::Proxy);
    }

    #[test]
    fn match_request_ignores_query_and_method() {
        let r = router();
        let req = Request::builder()
            .method("DELETE")
            .uri("http://gateway/api/items?id=7")
            .body(())
            .unwrap();
        assert_eq!(r.match_request(&req), Route::Proxy);

        let req = Request::builder()
            .method("POST")
            .uri("/health?verbose=1")
            .body(())
            .unwrap();
        assert_eq!(r.match_request(&req), Route::Liveness);
    }
}
