//! Composable route groups for axum.
//!
//! Routes are declared on [`RouteGroup`]s that are independent of any live
//! router, combined with `mount`/`with_scope`, and bound to a router only
//! when docked.
//!
//! ```
//! use route_dock::{RouteGroup, RouteTable};
//!
//! let mut photos = RouteGroup::new("photos");
//! photos.get("", ["query_photos"]).get("/:id", ["get_photo"]);
//!
//! let mut v1 = RouteGroup::with_middleware("v1", ["log"]);
//! v1.mount("", [&photos]);
//!
//! let mut table = RouteTable::new();
//! v1.dock("/api", &mut table).unwrap();
//! assert_eq!(table.entries()[1].path, "/api/v1/photos/:id");
//! assert_eq!(table.entries()[1].handlers, ["log", "get_photo"]);
//! ```

// Core
pub mod dock;
pub mod group;

// Serving
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use dock::{AxumRegistrar, DockError, Link, Registrar, RouteTable};
pub use group::{RouteGroup, RouteItem};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
