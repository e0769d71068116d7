mod app;
mod config;
mod doc;
mod dtos;
mod error;
mod extract;
mod routes;
mod state;
mod utils;

use crate::{config::Config, state::AppState, utils::shutdown::shutdown_signal};
use database::db::connect;
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let db = match connect(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to the database: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config.run_migrations {
        info!("Applying pending migrations");
        if let Err(e) = Migrator::up(&db, None).await {
            error!("Failed to apply migrations: {e}");
            return ExitCode::FAILURE;
        }
    }

    let app = app::router(AppState::new(db), &config.cors_origins);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {e}", config.bind_addr());
            return ExitCode::FAILURE;
        }
    };
    info!("Running axum on http://{}", config.bind_addr());

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
