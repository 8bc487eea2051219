use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::labeling::OpenAiImageLabeler;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::{LabelingState, StoreState};

fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_config() -> Result<configs::AppConfig, StartupError> {
    configs::AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

fn bind_addr(host: &str, port: u16) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("{host}:{port}: {e}")))
}

async fn serve(addr: SocketAddr, app: Router) -> Result<(), StartupError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::Runtime(format!("bind {addr}: {e}")))?;
    axum::serve(listener, app).await.map_err(anyhow::Error::from)?;
    Ok(())
}

/// Annotation store: open the database, apply the schema, serve `/api/labels`.
pub async fn run_store() -> Result<(), StartupError> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;
    common::env::ensure_db_dir(cfg.database.file_path()).await?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Runtime(format!("database connection failed: {e}")))?;
    // 启动时建表（已存在则跳过）
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Runtime(format!("schema setup failed: {e}")))?;

    let app = routes::build_store_router(StoreState::new(db), build_cors());

    let addr = bind_addr(&cfg.server.host, cfg.server.port)?;
    info!(%addr, "starting annotation store");
    serve(addr, app).await
}

/// Labeling service: forward image paths to the configured vision model.
pub async fn run_labeler() -> Result<(), StartupError> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;
    let api_key = cfg
        .labeling
        .require_api_key()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    common::env::check_image_root(&cfg.labeling.image_root).await;

    let labeler = OpenAiImageLabeler::new(&cfg.labeling, api_key)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let state = LabelingState { labeler: Arc::new(labeler) };
    let app = routes::build_labeling_router(state, build_cors());

    let addr = bind_addr(&cfg.labeling.host, cfg.labeling.port)?;
    info!(%addr, model = %cfg.labeling.model, "starting labeling service");
    serve(addr, app).await
}
