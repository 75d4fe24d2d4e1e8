//! Accounts and password credentials

use crate::{error::Result, StorageError};
use chrono::{DateTime, Utc};
use kudo_core::{User, UserId};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Input for creating an account
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub image: Option<String>,
    /// Already hashed (bcrypt)
    pub password_hash: String,
}

/// Create an account and its credentials in one transaction
///
/// Fails with `StorageError::Duplicate` when the email is taken.
pub async fn create(pool: &SqlitePool, input: CreateUser) -> Result<User> {
    let user = User {
        id: UserId::generate(),
        email: input.email,
        name: input.name,
        image: input.image,
        created_at: Utc::now(),
    };

    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO users (id, email, name, image, created_at) VALUES (?, ?, ?, ?, ?)")
        .bind(user.id.as_str())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.image)
        .bind(user.created_at.timestamp())
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::from_insert(e, &format!("User {}", user.email)))?;

    sqlx::query("INSERT INTO user_credentials (user_id, password_hash, updated_at) VALUES (?, ?, ?)")
        .bind(user.id.as_str())
        .bind(&input.password_hash)
        .bind(user.created_at.timestamp())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(user)
}

/// Look up an account by email
pub async fn get_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, email, name, image, created_at FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Look up an account by id
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, email, name, image, created_at FROM users WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// All accounts, oldest first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, email, name, image, created_at FROM users ORDER BY created_at, email")
        .fetch_all(pool)
        .await?;

    rows.iter().map(user_from_row).collect()
}

/// Whether an account with this email exists
pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Get a user's password hash, if credentials are set
pub async fn get_password_hash(pool: &SqlitePool, id: &UserId) -> Result<Option<String>> {
    let hash = sqlx::query_scalar("SELECT password_hash FROM user_credentials WHERE user_id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(hash)
}

/// Create or replace a user's password hash
pub async fn set_password_hash(pool: &SqlitePool, id: &UserId, password_hash: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO user_credentials (user_id, password_hash, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(user_id)
         DO UPDATE SET password_hash = excluded.password_hash, updated_at = excluded.updated_at",
    )
    .bind(id.as_str())
    .bind(password_hash)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await?;

    Ok(())
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let created_at: i64 = row.get("created_at");
    Ok(User {
        id: UserId::new(row.get::<String, _>("id")),
        email: row.get("email"),
        name: row.get("name"),
        image: row.get("image"),
        created_at: DateTime::from_timestamp(created_at, 0)
            .ok_or_else(|| StorageError::InvalidData(format!("timestamp {}", created_at)))?,
    })
}
