use std::net::SocketAddr;

use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use service::auth::TokenConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received, draining connections");
    }
}

/// Connect, migrate when enabled, build the router and serve.
pub async fn run_with_config(cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Migration(e.to_string()))?;
        info!("migrations applied");
    }

    let state = ServerState::from_db(db, TokenConfig::from(&cfg.auth));
    let app = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting car stock api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let server = ServerConfig { host: "0.0.0.0".into(), port: 9000, ..Default::default() };
        assert_eq!(bind_addr(&server).unwrap().to_string(), "0.0.0.0:9000");
    }

    #[test]
    fn bad_host_is_invalid_config() {
        let server = ServerConfig { host: "not a host".into(), port: 9000, ..Default::default() };
        assert!(matches!(bind_addr(&server), Err(StartupError::InvalidConfig(_))));
    }
}
