//! User playlists persisted under the `playlists` key

use crate::error::{LibraryError, Result};
use kudo_core::{KeyValueStore, Playlist, Song};
use tracing::{debug, warn};

/// Storage key for the playlist array
pub const PLAYLISTS_KEY: &str = "playlists";

/// Result of adding a song to a playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// A song with the same id is already in the playlist
    AlreadyPresent,
}

/// Playlists loaded from a [`KeyValueStore`]; every change is written back
pub struct PlaylistLibrary<S: KeyValueStore> {
    store: S,
    playlists: Vec<Playlist>,
}

impl<S: KeyValueStore> PlaylistLibrary<S> {
    /// Load playlists from `store`
    ///
    /// A missing key is an empty library; an undecodable value is logged and
    /// treated as empty (it is overwritten by the next change).
    pub fn load(store: S) -> Result<Self> {
        let playlists: Vec<Playlist> = match store.get(PLAYLISTS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Failed to parse playlists, starting empty");
                Vec::new()
            }),
            None => Vec::new(),
        };
        debug!(count = playlists.len(), "Loaded playlists");
        Ok(Self { store, playlists })
    }

    pub fn all(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn get(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Create an empty playlist with a trimmed, non-empty name
    pub fn create(&mut self, name: &str) -> Result<&Playlist> {
        self.create_with_songs(name, None, Vec::new())
    }

    /// Create a playlist pre-filled with `songs` (duplicates by id dropped)
    pub fn create_with_songs(
        &mut self,
        name: &str,
        description: Option<String>,
        songs: Vec<Song>,
    ) -> Result<&Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::EmptyName);
        }

        let mut playlist = Playlist::new(name);
        // Ids are creation millis; bump on collision within the same millisecond
        while self.get(&playlist.id).is_some() {
            playlist.created_at += 1;
            playlist.id = playlist.created_at.to_string();
        }
        playlist.description = description.filter(|d| !d.trim().is_empty());
        for song in songs {
            playlist.add_song(song);
        }

        self.playlists.push(playlist);
        self.save()?;

        let index = self.playlists.len() - 1;
        Ok(&self.playlists[index])
    }

    /// Delete a playlist, returning it if it existed
    pub fn delete(&mut self, id: &str) -> Result<Option<Playlist>> {
        let Some(index) = self.playlists.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let removed = self.playlists.remove(index);
        self.save()?;
        Ok(Some(removed))
    }

    /// Append `song` unless the playlist already holds its id
    pub fn add_song(&mut self, playlist_id: &str, song: Song) -> Result<AddOutcome> {
        let playlist = self.find_mut(playlist_id)?;
        if !playlist.add_song(song) {
            return Ok(AddOutcome::AlreadyPresent);
        }
        self.save()?;
        Ok(AddOutcome::Added)
    }

    /// Remove a song by id; `false` when it was not in the playlist
    pub fn remove_song(&mut self, playlist_id: &str, song_id: &str) -> Result<bool> {
        let playlist = self.find_mut(playlist_id)?;
        if playlist.remove_song(song_id).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LibraryError::PlaylistNotFound(id.to_string()))
    }

    fn save(&mut self) -> Result<()> {
        self.store.set_json(PLAYLISTS_KEY, &self.playlists)?;
        Ok(())
    }
}
