//! etude-api — personal music-practice backend service
//!
//! Serves the song catalog, favorites, search history, difficulty
//! overrides, the proficiency gauge and recommendations over HTTP.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use etude_api::{build_router, AppState};
use etude_common::config::{self, ServiceConfig};
use etude_common::db::init::init_database;

#[derive(Parser, Debug)]
#[command(name = "etude-api", about = "Personal music-practice backend")]
struct Args {
    /// Root folder holding the database and config.toml
    #[arg(long, env = "ETUDE_ROOT_FOLDER")]
    root_folder: Option<String>,

    /// Override the TCP port from config.toml
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Build identification first, before any database delays
    info!(
        "Starting etude-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), "ETUDE_ROOT_FOLDER")?;
    std::fs::create_dir_all(&root_folder)?;

    let mut service_config = ServiceConfig::load(&root_folder)?;
    if let Some(port) = args.port {
        service_config.port = port;
    }

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());
    let pool = init_database(&db_path).await?;

    let port = service_config.port;
    let state = AppState::new(pool, service_config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("etude-api listening on http://127.0.0.1:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
