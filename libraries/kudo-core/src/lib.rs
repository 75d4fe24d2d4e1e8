//! Kudo Core
//!
//! Platform-agnostic core types, traits, and error handling for Kudo.
//!
//! This crate provides the building blocks shared by the catalog adapters,
//! the client playback core and the server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Playlist`, `User`, `UserId`
//! - **Core Traits**: `SongSearch` (catalog lookups), `KeyValueStore` (client persistence)
//! - **Error Handling**: Unified `KudoError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use kudo_core::types::{Playlist, Song};
//!
//! let song = Song::new("Paem2Kf1", "Starboy", "The Weeknd, Daft Punk")
//!     .with_audio_url("https://aac.saavncdn.com/372/starboy_320.mp4");
//! assert!(song.is_playable());
//!
//! let mut playlist = Playlist::new("Late night");
//! assert!(playlist.add_song(song.clone()));
//! assert!(!playlist.add_song(song));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{KudoError, Result};
pub use storage::{KeyValueStore, MemoryStore};
pub use traits::SongSearch;
pub use types::{AudioRef, Playlist, Song, User, UserId};
