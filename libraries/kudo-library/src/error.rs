/// Library error types
use thiserror::Error;

/// Result type alias using `LibraryError`
pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Error, Debug)]
pub enum LibraryError {
    /// Playlist name is empty after trimming
    #[error("Playlist name cannot be empty")]
    EmptyName,

    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// Backing store failed
    #[error(transparent)]
    Store(#[from] kudo_core::KudoError),
}
