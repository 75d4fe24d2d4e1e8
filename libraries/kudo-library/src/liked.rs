//! Liked songs persisted under the `likedSongs` key

use crate::error::Result;
use kudo_core::{KeyValueStore, Song};
use tracing::warn;

/// Storage key for the liked-songs array
pub const LIKED_SONGS_KEY: &str = "likedSongs";

/// Ordered liked songs, unique by id
pub struct LikedSongs<S: KeyValueStore> {
    store: S,
    songs: Vec<Song>,
}

impl<S: KeyValueStore> LikedSongs<S> {
    /// Load from `store`; an undecodable value is logged and treated as empty
    pub fn load(store: S) -> Result<Self> {
        let songs: Vec<Song> = match store.get(LIKED_SONGS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Failed to parse liked songs, starting empty");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Ok(Self { store, songs })
    }

    pub fn all(&self) -> &[Song] {
        &self.songs
    }

    pub fn is_liked(&self, song_id: &str) -> bool {
        self.songs.iter().any(|s| s.id == song_id)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Like or unlike `song`, returning whether it is now liked
    pub fn toggle(&mut self, song: Song) -> Result<bool> {
        let liked = if let Some(index) = self.songs.iter().position(|s| s.id == song.id) {
            self.songs.remove(index);
            false
        } else {
            self.songs.push(song);
            true
        };
        self.save()?;
        Ok(liked)
    }

    /// Unlike by id; `false` when it was not liked
    pub fn remove(&mut self, song_id: &str) -> Result<bool> {
        let before = self.songs.len();
        self.songs.retain(|s| s.id != song_id);
        if self.songs.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn save(&mut self) -> Result<()> {
        self.store.set_json(LIKED_SONGS_KEY, &self.songs)?;
        Ok(())
    }
}
