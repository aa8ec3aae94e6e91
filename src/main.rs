use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use catalog_api::config::{load_env_file, AppConfig};
use catalog_api::database::Database;
use catalog_api::{app, AppState};

const DEFAULT_ENV_FILE: &str = "env.yaml";

#[derive(Debug, Parser)]
#[command(name = "catalog-api", version, about = "Book catalog REST API")]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// YAML file of environment variables to load before reading configuration
    #[arg(long, env = "CATALOG_ENV_FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env if present so cargo run picks up DATABASE_URL, SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,catalog_api=debug,tower_http=info")),
        )
        .init();

    match &args.config {
        Some(path) => {
            load_env_file(path).with_context(|| format!("loading {}", path.display()))?;
        }
        None => {
            let default = PathBuf::from(DEFAULT_ENV_FILE);
            if default.exists() {
                load_env_file(&default).with_context(|| format!("loading {DEFAULT_ENV_FILE}"))?;
            }
        }
    }

    let mut config = AppConfig::from_env()?;
    if let Some(port) = args.port {
        config.api.port = port;
    }
    info!("Starting catalog API in {:?} mode", config.environment);

    info!("Connecting to the database...");
    let db = Database::connect(&config.database)
        .await
        .context("connecting to the database")?;

    let state = AppState::new(Arc::new(db.clone()), &config.security)?;

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutting down server...");
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
