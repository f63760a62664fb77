//! Embedded Diesel migrations applied at startup.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// Could not connect to the database.
    #[error("migration connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// A migration failed to apply.
    #[error("migration failed to apply: {message}")]
    Apply {
        /// Underlying failure description.
        message: String,
    },
}

/// Apply all pending migrations over a short-lived synchronous connection.
///
/// Runs before the async pool exists, so blocking here is fine.
pub fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut connection =
        PgConnection::establish(database_url).map_err(|err| MigrationError::Connection {
            message: err.to_string(),
        })?;
    connection
        .run_pending_migrations(MIGRATIONS)
        .map(|applied| {
            if !applied.is_empty() {
                tracing::info!(count = applied.len(), "applied pending migrations");
            }
        })
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })
}
