mod cli;
mod infra;
mod report;
mod routes;
mod server;

use listing_match::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
