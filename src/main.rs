//! Command-line entry point for the compensation engine.
//!
//! `serve` runs the HTTP API; `mcp` runs the JSON-RPC tool server on
//! stdin/stdout. Logs always go to stderr.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use compensation_engine::api::{AppState, UpstreamProxy, create_router};
use compensation_engine::config::ConfigLoader;
use compensation_engine::mcp::McpServer;

#[derive(Parser, Debug)]
#[command(name = "compensation-engine")]
#[command(about = "Statutory compensation calculators for Argentine labor law", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding regime.yaml and amounts/; built-in amounts when omitted
    #[arg(long, global = true, env = "CALC_CONFIG_DIR")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, env = "CALC_BIND_ADDR", default_value = "127.0.0.1:8001")]
        bind: SocketAddr,

        /// Base URL of the upstream calculation service for the proxy endpoint
        #[arg(long, env = "CALC_API_BASE")]
        upstream: Option<String>,
    },
    /// Serve the calculators as tools over stdin/stdout
    Mcp,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(dir: Option<&PathBuf>) -> Result<ConfigLoader> {
    match dir {
        Some(dir) => {
            let loader = ConfigLoader::load(dir)
                .with_context(|| format!("failed to load configuration from {}", dir.display()))?;
            info!(
                regime = %loader.regime().code,
                version = %loader.regime().version,
                amount_sets = loader.config().amounts().len(),
                "Loaded configuration"
            );
            Ok(loader)
        }
        None => {
            info!("No configuration directory given, using built-in statutory amounts");
            Ok(ConfigLoader::builtin())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Arc::new(load_config(cli.config.as_ref())?);

    match cli.command {
        Command::Serve { bind, upstream } => {
            let mut state = AppState::from_shared(config);
            if let Some(upstream) = upstream.filter(|url| !url.trim().is_empty()) {
                info!(upstream = %upstream, "Proxy endpoint enabled");
                state = state.with_proxy(UpstreamProxy::new(upstream));
            }

            let listener = TcpListener::bind(bind)
                .await
                .with_context(|| format!("failed to bind {}", bind))?;
            info!(address = %bind, "HTTP API listening");
            axum::serve(listener, create_router(state))
                .await
                .context("HTTP server failed")?;
        }
        Command::Mcp => {
            let server = McpServer::new(config);
            server
                .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await
                .context("tool server I/O failed")?;
        }
    }

    Ok(())
}
