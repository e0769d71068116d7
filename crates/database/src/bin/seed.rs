use database::{db::create_connection, services::seed::SeedService};
use log::{error, info};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let db = match create_connection().await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to the database: {e}");
            return ExitCode::FAILURE;
        }
    };

    match SeedService::seed_sample_data(&db).await {
        Ok(0) => info!("Nothing to seed"),
        Ok(count) => info!("Seeded {count} courses"),
        Err(e) => {
            error!("Seeding failed: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
