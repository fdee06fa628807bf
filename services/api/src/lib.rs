mod cli;
mod infra;
mod routes;
mod server;

use onboarding::error::AppError;

pub use routes::gateway_router;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
