//! Kudo - Library
//!
//! Client-side state that outlives a playback session:
//!
//! - Playlists (key `playlists`), duplicates by song id rejected on insert
//! - Liked songs (key `likedSongs`), toggled per song id
//! - Toast notifications with automatic expiry
//!
//! Persistence goes through [`kudo_core::KeyValueStore`]: use
//! [`kudo_core::MemoryStore`] in tests and [`JsonFileStore`] on disk.
//!
//! # Example
//!
//! ```rust
//! use kudo_core::{MemoryStore, Song};
//! use kudo_library::{AddOutcome, PlaylistLibrary};
//!
//! let mut library = PlaylistLibrary::load(MemoryStore::new()).unwrap();
//! let id = library.create("Road Trip").unwrap().id.clone();
//!
//! let song = Song::new("a", "Starboy", "The Weeknd");
//! assert_eq!(library.add_song(&id, song.clone()).unwrap(), AddOutcome::Added);
//! assert_eq!(library.add_song(&id, song).unwrap(), AddOutcome::AlreadyPresent);
//! ```

mod error;
mod file_store;
mod liked;
mod playlists;
mod toasts;

pub use error::{LibraryError, Result};
pub use file_store::JsonFileStore;
pub use liked::{LikedSongs, LIKED_SONGS_KEY};
pub use playlists::{AddOutcome, PlaylistLibrary, PLAYLISTS_KEY};
pub use toasts::{Toast, ToastKind, ToastQueue, DEFAULT_TOAST_DURATION};
