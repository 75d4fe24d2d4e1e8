/// One-time signup codes
use crate::error::{Result, ServerError};
use chrono::{DateTime, Duration, Utc};
use kudo_storage::otps;
use rand::Rng;
use sqlx::SqlitePool;

#[derive(Debug, Clone)]
pub struct OtpService {
    ttl: Duration,
}

impl OtpService {
    pub fn new(ttl_minutes: u64) -> Self {
        Self {
            ttl: Duration::minutes(ttl_minutes as i64),
        }
    }

    pub fn ttl_minutes(&self) -> i64 {
        self.ttl.num_minutes()
    }

    /// Uniformly random six-digit code (100000..=999999)
    pub fn generate_code() -> String {
        rand::thread_rng().gen_range(100_000..=999_999).to_string()
    }

    /// Store a fresh code for `email`, replacing any earlier one
    pub async fn issue(&self, pool: &SqlitePool, email: &str) -> Result<String> {
        self.issue_at(pool, email, Utc::now()).await
    }

    pub async fn issue_at(&self, pool: &SqlitePool, email: &str, now: DateTime<Utc>) -> Result<String> {
        let code = Self::generate_code();
        otps::upsert(pool, email, &code, now + self.ttl).await?;
        tracing::debug!(email = %email, "Issued OTP");
        Ok(code)
    }

    /// Check a submitted code without consuming it
    pub async fn verify(&self, pool: &SqlitePool, email: &str, code: &str) -> Result<()> {
        self.verify_at(pool, email, code, Utc::now()).await
    }

    pub async fn verify_at(
        &self,
        pool: &SqlitePool,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let record = otps::find(pool, email, code)
            .await?
            .ok_or_else(|| ServerError::BadRequest("Invalid OTP".to_string()))?;

        if record.is_expired(now) {
            return Err(ServerError::BadRequest("OTP expired".to_string()));
        }
        Ok(())
    }

    /// Remove the code once it has been used
    pub async fn consume(&self, pool: &SqlitePool, email: &str) -> Result<()> {
        otps::delete(pool, email).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_six_digits() {
        for _ in 0..500 {
            let code = OtpService::generate_code();
            assert_eq!(code.len(), 6);
            let value: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn test_ttl() {
        assert_eq!(OtpService::new(10).ttl_minutes(), 10);
    }
}
