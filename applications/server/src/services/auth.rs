//! Session tokens and password hashing
//!
//! A Kudo session is a pair of HS256 JWTs. The short-lived access token
//! authorizes `/api/auth/session`; the refresh token only mints new pairs.
//! Tokens carry the user id and nothing else, so the refresh handler looks the
//! user up again and a deleted account cannot renew its session.

use crate::error::{Result, ServerError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use kudo_core::UserId;
use serde::{Deserialize, Serialize};

/// bcrypt work factor for stored passwords
pub const PASSWORD_COST: u32 = 10;

/// Issues and checks session tokens, hashes passwords
#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

/// Which half of the session pair a token is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenType,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub.clone())
    }

    /// Expiry reported by `GET /api/auth/session`
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

impl AuthService {
    pub fn new(secret: String, access_hours: u64, refresh_days: u64) -> Self {
        Self {
            secret,
            access_ttl: Duration::hours(access_hours as i64),
            refresh_ttl: Duration::days(refresh_days as i64),
        }
    }

    /// Passwords are hashed as given; callers must not trim them
    pub fn hash_password(&self, password: &str) -> Result<String> {
        Ok(bcrypt::hash(password, PASSWORD_COST)?)
    }

    /// `Ok(false)` on mismatch; a malformed stored hash is an error
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        Ok(bcrypt::verify(password, hash)?)
    }

    pub fn create_access_token(&self, user_id: &UserId) -> Result<String> {
        self.issue(user_id, TokenType::Access, self.access_ttl)
    }

    pub fn create_refresh_token(&self, user_id: &UserId) -> Result<String> {
        self.issue(user_id, TokenType::Refresh, self.refresh_ttl)
    }

    /// Decode an access token; a refresh token presented here is rejected
    pub fn access_claims(&self, token: &str) -> Result<Claims> {
        self.claims_of(token, TokenType::Access)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<UserId> {
        self.access_claims(token).map(|claims| claims.user_id())
    }

    /// User id behind a refresh token
    ///
    /// Only the signature, expiry and type are checked here; whether the
    /// account still exists is up to the caller.
    pub fn verify_refresh_token(&self, token: &str) -> Result<UserId> {
        self.claims_of(token, TokenType::Refresh)
            .map(|claims| claims.user_id())
    }

    fn claims_of(&self, token: &str, expected: TokenType) -> Result<Claims> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let claims = decode::<Claims>(token, &key, &Validation::default())?.claims;
        if claims.token_type != expected {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        Ok(claims)
    }

    fn issue(&self, user_id: &UserId, token_type: TokenType, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        let key = EncodingKey::from_secret(self.secret.as_bytes());
        Ok(encode(&Header::default(), &claims, &key)?)
    }
}
