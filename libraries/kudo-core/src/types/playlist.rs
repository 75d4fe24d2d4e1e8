/// Playlist domain type
use crate::types::Song;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Client-side playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: String,

    /// Playlist name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Ordered songs, unique by id
    #[serde(default)]
    pub songs: Vec<Song>,

    /// Creation timestamp (epoch milliseconds)
    pub created_at: i64,
}

impl Playlist {
    /// Create a new empty playlist
    ///
    /// The id is the creation timestamp in milliseconds, as the web client does.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            id: now.to_string(),
            name: name.into(),
            description: None,
            image: None,
            songs: Vec::new(),
            created_at: now,
        }
    }

    /// Add a song unless one with the same id is already present
    ///
    /// Returns `true` when the song was added.
    pub fn add_song(&mut self, song: Song) -> bool {
        if self.contains(&song.id) {
            return false;
        }
        self.songs.push(song);
        true
    }

    /// Remove a song by id, returning it if present
    pub fn remove_song(&mut self, song_id: &str) -> Option<Song> {
        let index = self.songs.iter().position(|s| s.id == song_id)?;
        Some(self.songs.remove(index))
    }

    pub fn contains(&self, song_id: &str) -> bool {
        self.songs.iter().any(|s| s.id == song_id)
    }
}
