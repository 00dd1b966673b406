//! Path-rewriting proxy.
//!
//! # Data Flow
//! ```text
//! Request under API prefix
//!     → target.rs (strip prefix, rebase onto backend URL)
//!     → forward.rs (send, bounded wait, relay response)
//!     → error.rs (502 / 504 on failure)
//! ```

pub mod error;
pub mod forward;
pub mod target;

pub use error::ProxyError;
pub use forward::Forwarder;
pub use target::{ProxyTarget, TargetError};
