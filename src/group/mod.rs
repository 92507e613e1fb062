//! Route group subsystem.
//!
//! # Data Flow
//! ```text
//! Declaration (any time before dock):
//!     handle(method, path, handlers) → unqualified RouteItem
//!     use_middleware(handlers)       → group middleware
//!     mount(prefix, groups)          → copies of resolved source routes
//!
//! Enumeration (iter / routes):
//!     RouteItem → path::qualify(group prefix, path)
//!               → group middleware ++ route handlers
//!
//! Dock:
//!     resolved RouteItem → path::qualify(dock prefix, path)
//!                        → Registrar::register(method, path, handlers)
//! ```
//!
//! # Design Decisions
//! - Nothing touches a live router before dock
//! - Handlers are opaque values (`H: Clone`); the group never calls them
//! - Enumeration is an iterator; `routes()` just collects it

pub mod builder;
pub mod path;
pub mod route;

pub use builder::{RouteGroup, Routes};
pub use route::RouteItem;
