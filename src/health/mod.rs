//! Liveness endpoint.
//!
//! Answers whether this process accepts connections. It never consults the
//! upstream: an unreachable backend shows up as 502 on proxied routes, not here.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Fixed liveness payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liveness {
    pub status: String,
}

impl Liveness {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// `GET /health` → `200 {"status":"healthy"}`, for any method.
pub async fn liveness() -> Json<Liveness> {
    Json(Liveness::healthy())
}
