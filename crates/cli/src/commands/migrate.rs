//! Database migration command.
//!
//! Runs the content schema migrations from `crates/admin/migrations/`
//! and then lets the tower-sessions store create its own tables. Both
//! binaries share one database, so one `migrate` covers everything.

use tower_sessions_sqlx_store::PostgresStore;

use super::ConnectError;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the connection, a migration, or the
/// session store setup fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = super::connect().await?;

    tracing::info!("Running content migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Setting up session tables...");
    PostgresStore::new(pool.clone()).migrate().await?;

    tracing::info!("Migrations complete");
    Ok(())
}
