//! route-dock demo server.
//!
//! Declares the demo photo API as route groups, docks it onto an axum router
//! at the configured prefix and serves it until SIGINT/SIGTERM.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use route_dock::config::{load_config, validate_config, ConfigError, ServerConfig};
use route_dock::dock::RouteTable;
use route_dock::http::photos::api_group;
use route_dock::http::{AppState, HttpServer};
use route_dock::lifecycle::{signals, Shutdown};
use route_dock::observability::logging;

#[derive(Parser)]
#[command(name = "route-dock")]
#[command(about = "Serve the demo API declared with composable route groups", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,

    /// Override routes.dock_prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Print the docked routes and exit
    #[arg(long)]
    print_routes: bool,
}

fn resolve_config(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(prefix) = &cli.prefix {
        config.routes.dock_prefix = prefix.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let api = api_group();

    if cli.print_routes {
        let mut table = RouteTable::new();
        api.dock(&config.routes.dock_prefix, &mut table)?;
        for route in table.entries() {
            println!("{}", route);
        }
        return Ok(());
    }

    logging::init(&config.observability)?;
    tracing::info!("route-dock v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        dock_prefix = %config.routes.dock_prefix,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, &api, AppState::default())?;

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        trigger.trigger();
    });

    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
