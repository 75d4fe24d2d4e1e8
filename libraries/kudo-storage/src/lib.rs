//! Kudo Storage
//!
//! `SQLite` persistence for the Kudo server: accounts with their password
//! hashes, and pending one-time signup codes.
//!
//! Each feature owns its own queries (`users`, `otps`); functions take the
//! pool directly.
//!
//! # Example
//!
//! ```rust,no_run
//! use kudo_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://kudo.db").await?;
//! run_migrations(&pool).await?;
//!
//! let registered = kudo_storage::users::email_exists(&pool, "alice@example.com").await?;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod otps;
pub mod users;

pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before serving requests.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// The database file is created when missing; WAL mode and a busy timeout
/// let concurrent handlers share it.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
