//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup
//!     → listener.rs (bind host:port, fatal on failure)
//!     → Hand the listener to the HTTP server
//! ```
//!
//! # Design Decisions
//! - Binding happens last during startup, after config and subsystems are ready
//! - No admission control beyond the OS accept queue

pub mod listener;

pub use listener::{bind, ListenerError};
