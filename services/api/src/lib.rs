mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use pre_analise::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
