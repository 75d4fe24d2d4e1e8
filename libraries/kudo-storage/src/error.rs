/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violated
    #[error("{0} already exists")]
    Duplicate(String),

    /// Stored value could not be decoded
    #[error("Invalid stored value: {0}")]
    InvalidData(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Map a unique-constraint violation to `Duplicate`, pass anything else through
    pub(crate) fn from_insert(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Duplicate(what.to_string()),
            _ => Self::Database(err),
        }
    }
}

impl From<StorageError> for kudo_core::KudoError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => kudo_core::KudoError::not_found(entity, id),
            StorageError::Duplicate(what) => kudo_core::KudoError::Duplicate(what),
            other => kudo_core::KudoError::storage(other.to_string()),
        }
    }
}
