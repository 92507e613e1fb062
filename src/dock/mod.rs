//! Dock targets: where resolved routes get registered.
//!
//! # Data Flow
//! ```text
//! RouteGroup::dock(prefix, registrar)
//!     → Registrar::register(method, path, handlers)   (once per route, in order)
//!         ├─ table.rs   RouteTable: records entries (listing, tests)
//!         └─ router.rs  AxumRegistrar: translate path, assemble chain,
//!                       Router::route(path, method_router)
//! ```
//!
//! # Design Decisions
//! - The registrar owns all validation; route groups validate nothing
//! - Registrars report rejection as an error value instead of panicking
//! - axum chains are `Middleware* Endpoint` (see link.rs)

pub mod link;
pub mod router;
pub mod table;

pub use link::{Endpoint, Link, Middleware};
pub use router::{AxumRegistrar, DockError};
pub use table::RouteTable;

/// Registration capability of an external router.
pub trait Registrar<H> {
    /// Rejection reported by the router.
    type Error;

    /// Register one fully qualified route.
    fn register(&mut self, method: &str, path: &str, handlers: Vec<H>) -> Result<(), Self::Error>;
}

impl<H, R: Registrar<H> + ?Sized> Registrar<H> for &mut R {
    type Error = R::Error;

    fn register(&mut self, method: &str, path: &str, handlers: Vec<H>) -> Result<(), Self::Error> {
        (**self).register(method, path, handlers)
    }
}
