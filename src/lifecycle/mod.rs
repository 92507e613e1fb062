//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging → Dock groups → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     signals.rs (SIGINT/SIGTERM) → Shutdown::trigger
//!         → every subscriber's notified() resolves
//!         → axum graceful shutdown drains connections
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
