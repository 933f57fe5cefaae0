//! Database connection helpers.
//!
//! The salon data lives in a single SQLite file. Connections come from an
//! r2d2 pool that applies the same pragmas to every connection it hands out.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use log::error;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// How long a writer waits on a locked salon file before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Pragmas applied to every pooled connection.
///
/// SQLite leaves `foreign_keys` off per connection, so without this the
/// `REFERENCES` clauses on appointments, transactions and client history
/// would be ignored.
#[derive(Debug, Clone, Copy)]
pub struct SalonPragmas {
    pub busy_timeout: Duration,
}

impl Default for SalonPragmas {
    fn default() -> Self {
        Self {
            busy_timeout: BUSY_TIMEOUT,
        }
    }
}

impl SalonPragmas {
    fn statements(&self) -> String {
        format!(
            "PRAGMA foreign_keys = ON; \
             PRAGMA journal_mode = WAL; \
             PRAGMA synchronous = NORMAL; \
             PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        )
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SalonPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&self.statements())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Opens the salon database at `database_url` behind a connection pool.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(SalonPragmas::default()))
        .build(manager)
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().inspect_err(|e| error!("No salon database connection available: {e}"))
}

#[cfg(feature = "app")]
pub use migrations::run_migrations;

#[cfg(feature = "app")]
mod migrations {
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
    use log::info;

    use super::{DbPool, get_connection};
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    /// Applies pending schema migrations, returning how many ran.
    pub fn run_migrations(pool: &DbPool) -> RepositoryResult<usize> {
        let mut conn = get_connection(pool)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        for version in &applied {
            info!("applied migration {version}");
        }
        Ok(applied.len())
    }
}
