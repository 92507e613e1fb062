//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Dock a route group onto an axum Router
//! - Wire up middleware (tracing, timeout)
//! - Bind server to listener and serve until shutdown

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::dock::{AxumRegistrar, DockError};
use crate::http::photos::{AppGroup, PhotoStore};
use crate::lifecycle::Shutdown;

/// Application state injected into handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub photos: PhotoStore,
}

/// HTTP server serving one docked route group.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    route_count: usize,
}

impl HttpServer {
    /// Dock `group` at the configured prefix and build the router.
    pub fn new(config: ServerConfig, group: &AppGroup, state: AppState) -> Result<Self, DockError> {
        let mut registrar = AxumRegistrar::new();
        let route_count = group.dock(&config.routes.dock_prefix, &mut registrar)?;

        let router = Self::build_router(&config, registrar.into_router().with_state(state));
        Ok(Self {
            router,
            config,
            route_count,
        })
    }

    /// Wrap the docked routes with server-wide layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, router: Router) -> Router {
        router
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn route_count(&self) -> usize {
        self.route_count
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.route_count,
            dock_prefix = %self.config.routes.dock_prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.notified())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
