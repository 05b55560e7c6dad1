//! Backend entry-point: loads settings, prepares storage, and serves the
//! REST API.

mod server;

use std::ffi::OsString;
use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use grocery_backend::config::{DatabaseSettings, ServerSettings};
use grocery_backend::inbound::http::health::HealthState;
use grocery_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};

use server::{ServerConfig, create_server};

/// Settings come from the environment and configuration files only; the
/// program name is the sole argument handed to the loaders.
fn program_args() -> [OsString; 1] {
    [std::env::args_os()
        .next()
        .unwrap_or_else(|| OsString::from("grocery-backend"))]
}

fn config_error(error: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("invalid configuration: {error}"))
}

async fn connect(settings: &DatabaseSettings, migrate: bool) -> io::Result<DbPool> {
    let url = settings.database_url();
    if migrate {
        let migration_url = url.clone();
        let applied = web::block(move || run_migrations(&migration_url))
            .await
            .map_err(io::Error::other)?
            .map_err(io::Error::other)?;
        info!(applied, "database migrations applied");
    }
    let config = PoolConfig::new(url).with_max_size(settings.max_connections());
    DbPool::new(config).await.map_err(io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(program_args()).map_err(config_error)?;
    let bind_addr = settings.bind_addr().map_err(config_error)?;
    let mut config = ServerConfig::new(bind_addr);
    if !settings.in_memory {
        let database = DatabaseSettings::load_from_iter(program_args()).map_err(config_error)?;
        let pool = connect(&database, settings.run_migrations).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting grocery backend");
    create_server(health_state, config)?.await
}
