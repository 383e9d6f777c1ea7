mod cli;
mod infra;
mod outlook;
mod routes;
mod server;

use events_core::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
