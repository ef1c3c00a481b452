use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use taskdeck::api;
use taskdeck::service::BoardService;
use taskdeck::storage::{sqlite::SqliteStorage, Storage};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "taskdeck-server", version, about = "Kanban todo board server")]
struct Cli {
    /// Listen address, e.g. 127.0.0.1:3000
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// SQLite database file
    #[arg(long, default_value = "taskdeck.db")]
    db: PathBuf,

    /// Log level (env-filter syntax)
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(cli.log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let storage = Arc::new(SqliteStorage::open(&cli.db)?);
    storage.initialize().await?;
    info!(db = %cli.db.display(), "database ready");

    let svc = Arc::new(BoardService::new(storage));
    let app = api::router(svc)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("listening on http://{}", cli.listen);
    axum::serve(tokio::net::TcpListener::bind(cli.listen).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown requested");
}
