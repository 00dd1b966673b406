//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Proxied request/response:
//!     → headers.rs (strip hop-by-hop headers)
//!
//! Static request:
//!     → traversal.rs (reject paths escaping the asset root)
//!
//! Every response (when configured):
//!     → cors.rs (Access-Control-* headers)
//! ```
//!
//! # Design Decisions
//! - Fail closed: a suspicious static path is refused, never resolved
//! - No trust in client input

pub mod cors;
pub mod headers;
pub mod traversal;
