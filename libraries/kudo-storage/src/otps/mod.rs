//! Pending one-time signup codes

use crate::{error::Result, StorageError};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

/// A stored code for an email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Store a code for `email`, replacing any earlier one
pub async fn upsert(pool: &SqlitePool, email: &str, code: &str, expires_at: DateTime<Utc>) -> Result<()> {
    sqlx::query(
        "INSERT INTO otps (email, code, expires_at, created_at)
         VALUES (?, ?, ?, ?)
         ON CONFLICT(email)
         DO UPDATE SET code = excluded.code, expires_at = excluded.expires_at, created_at = excluded.created_at",
    )
    .bind(email)
    .bind(code)
    .bind(expires_at.timestamp_millis())
    .bind(Utc::now().timestamp_millis())
    .execute(pool)
    .await?;

    Ok(())
}

/// Find the record matching both `email` and `code`
///
/// Expired records are still returned; the caller decides.
pub async fn find(pool: &SqlitePool, email: &str, code: &str) -> Result<Option<OtpRecord>> {
    let row = sqlx::query("SELECT email, code, expires_at FROM otps WHERE email = ? AND code = ?")
        .bind(email)
        .bind(code)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let expires_at: i64 = row.get("expires_at");
    Ok(Some(OtpRecord {
        email: row.get("email"),
        code: row.get("code"),
        expires_at: DateTime::from_timestamp_millis(expires_at)
            .ok_or_else(|| StorageError::InvalidData(format!("timestamp {}", expires_at)))?,
    }))
}

/// Delete the code for `email`
pub async fn delete(pool: &SqlitePool, email: &str) -> Result<()> {
    sqlx::query("DELETE FROM otps WHERE email = ?")
        .bind(email)
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete every code that expired before `now`, returning how many went
pub async fn delete_expired(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM otps WHERE expires_at < ?")
        .bind(now.timestamp_millis())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
