/// User domain type
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account (without credentials)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login email, unique
    pub email: String,

    /// Display name
    pub name: String,

    /// Avatar image URL
    pub image: Option<String>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Default display name: the local part of the email address
    pub fn default_name(email: &str) -> String {
        email.split('@').next().unwrap_or(email).to_string()
    }

    /// Deterministic avatar URL derived from the email address
    pub fn default_avatar(email: &str) -> String {
        format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", email)
    }
}
