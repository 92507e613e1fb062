//! Docking onto an axum `Router`.
//!
//! # Responsibilities
//! - Map method strings to axum method filters
//! - Translate `:param` / `*catchall` segments to axum's `{param}` / `{*catchall}`
//! - Assemble a `Middleware* Endpoint` chain into one `MethodRouter`
//! - Reject duplicates and path conflicts before axum panics on them
//!
//! # Design Decisions
//! - An empty path docks at `/`, the router root
//! - The first middleware in a chain is the outermost layer (runs first)
//! - Conflicts are decided by a shadow `matchit` router, the matcher axum uses

use std::collections::HashSet;

use axum::http::Method;
use axum::routing::{MethodFilter, MethodRouter};
use axum::Router;
use thiserror::Error;

use crate::dock::link::Link;
use crate::dock::Registrar;

/// Route registration rejected by the axum adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DockError {
    /// Method string is not a valid HTTP token.
    #[error("invalid method {0:?}")]
    InvalidMethod(String),

    /// Valid method that axum cannot route on.
    #[error("unsupported method {0}")]
    UnsupportedMethod(String),

    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// Handler chain has no endpoint at its end.
    #[error("{method} {path}: handler chain does not end with an endpoint")]
    MissingEndpoint { method: String, path: String },

    /// Endpoint followed by more handlers.
    #[error("{method} {path}: endpoint must be the last handler in the chain")]
    MisplacedEndpoint { method: String, path: String },

    #[error("{method} {path} is already registered")]
    DuplicateRoute { method: String, path: String },

    /// Path overlaps a registered path in a way the router cannot match.
    #[error("{path} conflicts with registered route {existing}")]
    ConflictingRoute { path: String, existing: String },
}

/// Registers docked routes on an axum `Router<S>`.
pub struct AxumRegistrar<S = ()> {
    router: Router<S>,
    registered: HashSet<(Method, String)>,
    paths: HashSet<String>,
    shadow: matchit::Router<()>,
}

impl<S> AxumRegistrar<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::from_router(Router::new())
    }

    /// Dock on top of an existing router.
    ///
    /// Routes already present on `router` are unknown to the conflict checks.
    pub fn from_router(router: Router<S>) -> Self {
        Self {
            router,
            registered: HashSet::new(),
            paths: HashSet::new(),
            shadow: matchit::Router::new(),
        }
    }

    pub fn into_router(self) -> Router<S> {
        self.router
    }

    /// Number of distinct (method, path) pairs registered.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    fn check_duplicate(&self, method: &Method, path: &str) -> Result<(), DockError> {
        if self.registered.contains(&(method.clone(), path.to_string())) {
            return Err(DockError::DuplicateRoute {
                method: method.to_string(),
                path: path.to_string(),
            });
        }
        Ok(())
    }

    /// Insert a new path into the shadow router. Known paths only gain a method.
    fn reserve_path(&mut self, path: &str) -> Result<(), DockError> {
        if self.paths.contains(path) {
            return Ok(());
        }
        self.shadow.insert(path, ()).map_err(|e| match e {
            matchit::InsertError::Conflict { with } => DockError::ConflictingRoute {
                path: path.to_string(),
                existing: with,
            },
            _ => DockError::InvalidPath {
                path: path.to_string(),
                reason: "rejected by the router",
            },
        })?;
        self.paths.insert(path.to_string());
        Ok(())
    }
}

impl<S> Default for AxumRegistrar<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Registrar<Link<S>> for AxumRegistrar<S>
where
    S: Clone + Send + Sync + 'static,
{
    type Error = DockError;

    fn register(&mut self, method: &str, path: &str, handlers: Vec<Link<S>>) -> Result<(), DockError> {
        let result = parse_method(method).and_then(|(method, filter)| {
            let axum_path = translate_path(path)?;
            self.check_duplicate(&method, &axum_path)?;
            let route = assemble(method.as_str(), path, filter, handlers)?;
            self.reserve_path(&axum_path)?;
            Ok((method, axum_path, route))
        });

        let (method, axum_path, route) = match result {
            Ok(parts) => parts,
            Err(e) => {
                tracing::warn!(method = %method, path = %path, error = %e, "Route rejected");
                return Err(e);
            }
        };

        let router = std::mem::take(&mut self.router);
        self.router = router.route(&axum_path, route);
        self.registered.insert((method, axum_path));
        Ok(())
    }
}

fn parse_method(method: &str) -> Result<(Method, MethodFilter), DockError> {
    let parsed = Method::from_bytes(method.as_bytes())
        .map_err(|_| DockError::InvalidMethod(method.to_string()))?;
    let filter = MethodFilter::try_from(parsed.clone())
        .map_err(|_| DockError::UnsupportedMethod(parsed.to_string()))?;
    Ok((parsed, filter))
}

/// Translate a docked path into axum syntax.
pub fn translate_path(path: &str) -> Result<String, DockError> {
    if path.is_empty() {
        return Ok("/".to_string());
    }
    if !path.starts_with('/') {
        return Err(DockError::InvalidPath {
            path: path.to_string(),
            reason: "must start with '/'",
        });
    }

    let invalid = |reason| DockError::InvalidPath {
        path: path.to_string(),
        reason,
    };

    let mut out = String::with_capacity(path.len() + 4);
    let mut segments = path[1..].split('/').peekable();
    while let Some(segment) = segments.next() {
        out.push('/');
        if let Some(name) = segment.strip_prefix(':') {
            if name.is_empty() {
                return Err(invalid("empty parameter name"));
            }
            out.push('{');
            out.push_str(name);
            out.push('}');
        } else if let Some(name) = segment.strip_prefix('*') {
            if name.is_empty() {
                return Err(invalid("empty catch-all name"));
            }
            if segments.peek().is_some() {
                return Err(invalid("catch-all must be the last segment"));
            }
            out.push_str("{*");
            out.push_str(name);
            out.push('}');
        } else if segment.contains(['{', '}']) {
            return Err(invalid("braces are reserved"));
        } else {
            out.push_str(segment);
        }
    }
    Ok(out)
}

fn assemble<S>(
    method: &str,
    path: &str,
    filter: MethodFilter,
    mut handlers: Vec<Link<S>>,
) -> Result<MethodRouter<S>, DockError>
where
    S: Clone + Send + Sync + 'static,
{
    let endpoint = match handlers.pop() {
        Some(Link::Endpoint(endpoint)) => endpoint,
        _ => {
            return Err(DockError::MissingEndpoint {
                method: method.to_string(),
                path: path.to_string(),
            })
        }
    };

    let mut middleware = Vec::with_capacity(handlers.len());
    for link in handlers {
        match link {
            Link::Middleware(m) => middleware.push(m),
            Link::Endpoint(_) => {
                return Err(DockError::MisplacedEndpoint {
                    method: method.to_string(),
                    path: path.to_string(),
                })
            }
        }
    }

    // Last layer applied is the outermost.
    let route = middleware
        .iter()
        .rev()
        .fold(endpoint.method_router(filter), |route, m| m.wrap(route));
    Ok(route)
}
