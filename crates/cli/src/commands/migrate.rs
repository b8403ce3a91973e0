//! Database migration command.
//!
//! The whole schema lives in `crates/storefront/migrations/`; both binaries
//! share it. The tower-sessions table is created separately by each binary
//! at startup.

use super::{CommandError, connect};

/// Run all pending migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
