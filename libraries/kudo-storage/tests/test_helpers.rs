//! Test helpers for storage integration tests
//!
//! Databases are real SQLite files in a temporary directory so migrations,
//! constraints and indexes behave as in production.

use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = kudo_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        kudo_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: account input with a fake hash
#[allow(dead_code)]
pub fn new_user(email: &str) -> kudo_storage::users::CreateUser {
    kudo_storage::users::CreateUser {
        email: email.to_string(),
        name: email.split('@').next().unwrap_or(email).to_string(),
        image: None,
        password_hash: format!("hash-of-{}", email),
    }
}
