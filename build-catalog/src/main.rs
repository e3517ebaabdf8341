use anyhow::Result;
use build_catalog::{routes, state::AppState, utils, AppConfig};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding devices.json and builds.json (overrides DATA_DIR)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    utils::logger::init(&config.log_level)?;

    tracing::info!(
        "Starting build-catalog v{} (data: {}, builds: {})",
        env!("CARGO_PKG_VERSION"),
        config.data_dir.display(),
        config.builds_dir.display()
    );
    tracing::info!(
        "Downloads from {}, changelogs from {}",
        config.download_base_url,
        config.changelog_base_url
    );
    for path in [config.devices_path(), config.builds_path()] {
        if !path.exists() {
            tracing::warn!("{} does not exist yet, pages will fail until it does", path.display());
        }
    }

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config)?);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
