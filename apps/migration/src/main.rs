//! Migration CLI tool. Reads `DATABASE_URL`; run with `up`, `down`,
//! `status`, `fresh` and friends.
//!
//! The CLI installs its own tracing subscriber, so none is set up here.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(migration::Migrator).await;
}
