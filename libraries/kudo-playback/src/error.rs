//! Error types for playback

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Operation needs a current song
    #[error("No current song")]
    NoCurrentSong,

    /// Media backend failure (load, play, seek)
    #[error("Media backend error: {0}")]
    Backend(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
