use clap::Parser;
use shiftboard_core::config::ShiftboardConfig;
use shiftboard_gateway::{build_router, AppState};
use shiftboard_store::ScheduleStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "shiftboard-gateway", version, about = "Shiftboard REST server")]
struct Args {
    /// Config file (defaults to ~/.shiftboard/shiftboard.toml)
    #[arg(long, env = "SHIFTBOARD_CONFIG")]
    config: Option<String>,

    /// Listen address, overrides server.bind
    #[arg(long)]
    bind: Option<String>,

    /// Listen port, overrides server.port
    #[arg(long)]
    port: Option<u16>,

    /// SQLite file, overrides database.path
    #[arg(long)]
    db: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shiftboard_gateway=info,tower_http=debug".into()),
        )
        .init();

    let args = Args::parse();

    // explicit path > SHIFTBOARD_CONFIG env > ~/.shiftboard/shiftboard.toml
    let mut config = ShiftboardConfig::load(args.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        ShiftboardConfig::default()
    });
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(db) = args.db {
        config.database.path = db;
    }

    let db_path = config.database.path.clone();
    ensure_parent_dir(&db_path);
    info!(path = %db_path, "opening SQLite database");
    let store = ScheduleStore::open(&db_path)?;

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    let state = Arc::new(AppState::new(store));
    let router = build_router(state);

    info!("Shiftboard gateway listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
