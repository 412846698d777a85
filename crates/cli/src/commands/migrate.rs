//! Database migration command.
//!
//! Applies the storefront migrations in `crates/storefront/migrations/`.
//! Migrations never run automatically on server startup; this command is the
//! only path that alters the schema.

use tracing::info;

use super::{CommandError, connect};

/// Run all pending storefront migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    info!("Connecting to storefront database...");
    let pool = connect().await?;

    info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    info!("Storefront migrations complete!");
    Ok(())
}
