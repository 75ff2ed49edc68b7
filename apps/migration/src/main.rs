//! Migration CLI for the signup schema.
//!
//! Reads `DATABASE_URL` (from the environment or `.env`) and applies or
//! rolls back the `users` migrations, e.g. `migration up` / `migration down`.

use sea_orm_migration::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sea_orm_migration=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    cli::run_cli(migration::Migrator).await;
}
