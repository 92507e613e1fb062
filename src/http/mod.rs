//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! photos.rs  api_group(): RouteGroup<Link<AppState>>
//!     → server.rs  HttpServer::new: group.dock(prefix, AxumRegistrar)
//!     → Router + TimeoutLayer + TraceLayer
//!     → axum::serve until Shutdown
//!
//! Per request (inside docked routes):
//!     request.rs request_id → access_log → endpoint
//! ```

pub mod photos;
pub mod request;
pub mod server;

pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
