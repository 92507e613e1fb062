//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! group::builder  → debug per docked route, info per dock
//! dock::router    → warn per rejected route
//! http::server    → info on start/stop, TraceLayer per request
//!     → logging.rs (subscriber: EnvFilter + fmt/json)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured fields (method, path, handlers) rather than formatted messages
//! - Libraries only emit events; the binary installs the subscriber

pub mod logging;
