//! Handler chain elements for axum.
//!
//! A chain docked onto axum is zero or more [`Middleware`] followed by exactly
//! one [`Endpoint`]. Both are type-erased so that a single `RouteGroup<Link<S>>`
//! can hold any mix of axum handlers and middleware functions.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::extract::Request;
use axum::handler::Handler;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::routing::{MethodFilter, MethodRouter, Route};
use tower::{Layer, Service};

type WrapFn<S> = dyn Fn(MethodRouter<S>) -> MethodRouter<S> + Send + Sync;
type RouteFn<S> = dyn Fn(MethodFilter) -> MethodRouter<S> + Send + Sync;

/// Middleware applied around an endpoint.
pub struct Middleware<S = ()> {
    wrap: Arc<WrapFn<S>>,
}

impl<S> Middleware<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Middleware from an `async fn(Request, Next) -> impl IntoResponse`.
    pub fn from_fn<F, Fut, Out>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Out> + Send + 'static,
        Out: IntoResponse + 'static,
    {
        Self {
            wrap: Arc::new(move |route: MethodRouter<S>| -> MethodRouter<S> {
                let f = f.clone();
                route.layer(axum::middleware::from_fn(move |req: Request, next: Next| {
                    f(req, next)
                }))
            }),
        }
    }

    /// Middleware from any tower layer that axum accepts on a route.
    pub fn layer<L>(layer: L) -> Self
    where
        L: Layer<Route> + Clone + Send + Sync + 'static,
        L::Service: Service<Request> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        Self {
            wrap: Arc::new(move |route: MethodRouter<S>| -> MethodRouter<S> {
                route.layer(layer.clone())
            }),
        }
    }

    pub(crate) fn wrap(&self, route: MethodRouter<S>) -> MethodRouter<S> {
        (self.wrap)(route)
    }
}

impl<S> Clone for Middleware<S> {
    fn clone(&self) -> Self {
        Self {
            wrap: Arc::clone(&self.wrap),
        }
    }
}

impl<S> fmt::Debug for Middleware<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Middleware")
    }
}

/// The handler that produces the response.
pub struct Endpoint<S = ()> {
    route: Arc<RouteFn<S>>,
}

impl<S> Endpoint<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new<H, T>(handler: H) -> Self
    where
        H: Handler<T, S> + Sync,
        T: 'static,
    {
        Self {
            route: Arc::new(move |filter: MethodFilter| -> MethodRouter<S> {
                axum::routing::on(filter, handler.clone())
            }),
        }
    }

    pub(crate) fn method_router(&self, filter: MethodFilter) -> MethodRouter<S> {
        (self.route)(filter)
    }
}

impl<S> Clone for Endpoint<S> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
        }
    }
}

impl<S> fmt::Debug for Endpoint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Endpoint")
    }
}

/// One element of an axum handler chain.
pub enum Link<S = ()> {
    Middleware(Middleware<S>),
    Endpoint(Endpoint<S>),
}

impl<S> Link<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn middleware<F, Fut, Out>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Out> + Send + 'static,
        Out: IntoResponse + 'static,
    {
        Link::Middleware(Middleware::from_fn(f))
    }

    pub fn layer<L>(layer: L) -> Self
    where
        L: Layer<Route> + Clone + Send + Sync + 'static,
        L::Service: Service<Request> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        Link::Middleware(Middleware::layer(layer))
    }

    pub fn endpoint<H, T>(handler: H) -> Self
    where
        H: Handler<T, S> + Sync,
        T: 'static,
    {
        Link::Endpoint(Endpoint::new(handler))
    }

    pub fn is_endpoint(&self) -> bool {
        matches!(self, Link::Endpoint(_))
    }
}

impl<S> Clone for Link<S> {
    fn clone(&self) -> Self {
        match self {
            Link::Middleware(m) => Link::Middleware(m.clone()),
            Link::Endpoint(e) => Link::Endpoint(e.clone()),
        }
    }
}

impl<S> fmt::Debug for Link<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Middleware(m) => m.fmt(f),
            Link::Endpoint(e) => e.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::Response;

    async fn hello() -> &'static str {
        "hello"
    }

    async fn passthrough(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    #[test]
    fn test_link_kinds() {
        let endpoint: Link = Link::endpoint(hello);
        let middleware: Link = Link::middleware(passthrough);

        assert!(endpoint.is_endpoint());
        assert!(!middleware.is_endpoint());
        assert_eq!(format!("{:?}", vec![middleware, endpoint]), "[Middleware, Endpoint]");
    }

    #[test]
    fn test_clone_shares_handler() {
        let endpoint: Link = Link::endpoint(hello);
        let copy = endpoint.clone();
        match (&endpoint, &copy) {
            (Link::Endpoint(a), Link::Endpoint(b)) => assert!(Arc::ptr_eq(&a.route, &b.route)),
            _ => panic!("expected endpoints"),
        }
    }
}
