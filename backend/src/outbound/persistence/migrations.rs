//! Embedded schema migrations.
//!
//! Migrations run on a blocking thread over a synchronous `PgConnection`
//! because `diesel_migrations` has no async harness.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::macros::define_error_enum;

/// Migrations from `backend/migrations`, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

define_error_enum! {
    /// Failures while bringing the schema up to date.
    pub enum MigrationError: into_message {
        /// The migration connection could not be opened.
        Connection { message: String } => "migration connection failed: {message}",
        /// A migration failed to apply.
        Apply { message: String } => "migration failed: {message}",
        /// The blocking migration task panicked or was cancelled.
        Task { message: String } => "migration task failed: {message}",
    }
}

fn apply_pending(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| MigrationError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::apply(err.to_string()))?;
    Ok(applied.len())
}

/// Apply every pending migration against `database_url`.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a migration
/// fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_pending(&url))
        .await
        .map_err(|err| MigrationError::task(err.to_string()))??;
    info!(applied, "database migrations up to date");
    Ok(())
}
