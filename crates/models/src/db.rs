use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Build the connection pool. Statements check a connection out of the pool and
/// hand it back when they finish, including on error.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if cfg.idle_timeout_secs > 0 {
        opt.idle_timeout(Duration::from_secs(cfg.idle_timeout_secs));
    }
    if cfg.max_lifetime_secs > 0 {
        opt.max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }
    let db = Database::connect(opt).await?;
    info!(max_connections = cfg.max_connections, "database pool ready");
    Ok(db)
}

/// Private in-memory database, used by tests and throwaway runs.
pub async fn connect_in_memory() -> Result<DatabaseConnection, DbErr> {
    connect_with_config(&DatabaseConfig::in_memory()).await
}
