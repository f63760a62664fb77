//! Backend entry-point: configuration, migrations, pool, and HTTP server.

use actix_web::{HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::server::{ServerConfig, build_app, build_state};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    run_pending_migrations(config.database_url()).map_err(std::io::Error::other)?;

    let pool = DbPool::new(PoolConfig::new(config.database_url()))
        .await
        .map_err(std::io::Error::other)?;
    let state = build_state(&pool, config.token_secret());

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness flag stays shared.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(state.clone(), server_health_state.clone())
    })
    .bind(config.bind_addr())?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr(), "listening");
    server.run().await
}
