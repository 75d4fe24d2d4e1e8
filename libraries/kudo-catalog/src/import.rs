//! Playlist import through Freefy

use crate::{
    catalog::Catalog,
    error::{CatalogError, Result},
    freefy::{extract_track_items, PlaylistMeta},
};
use kudo_core::Song;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Maximum number of songs taken from one imported playlist
pub const IMPORT_LIMIT: usize = 50;

const DEFAULT_PLAYLIST_NAME: &str = "Imported Playlist";
const FALLBACK_DESCRIPTION: &str = "Songs from Kudo";
const FALLBACK_NOTE: &str =
    "Could not access Spotify playlist directly. Showing popular songs instead.";

/// Playlist metadata as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistInfo {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

/// Songs and metadata of an imported playlist
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistImport {
    pub songs: Vec<Song>,
    pub playlist: PlaylistInfo,
    /// Set when the discover channel was served instead of the playlist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Extract a playlist id from a bare id, an `open.spotify.com` URL or a
/// `spotify:playlist:` URI
pub fn parse_playlist_id(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CatalogError::InvalidInput("Playlist ID is required".to_string()));
    }

    let id = if let Some(rest) = input.strip_prefix("spotify:playlist:") {
        rest
    } else if let Some(idx) = input.find("open.spotify.com/") {
        let path = &input[idx + "open.spotify.com/".len()..];
        let path = path.split(['?', '#']).next().unwrap_or_default();
        path.split('/')
            .skip_while(|segment| *segment != "playlist")
            .nth(1)
            .unwrap_or_default()
    } else {
        input
    };

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(CatalogError::InvalidInput(format!("Invalid playlist ID: {}", input)));
    }
    Ok(id.to_string())
}

impl Catalog {
    /// Import a playlist, falling back to the discover channel
    ///
    /// Each Freefy endpoint is tried in order; the first one that yields at
    /// least one playable song wins. Fails with `NotFound` when neither the
    /// playlist nor the fallback produced songs.
    pub async fn import_playlist(&self, input: &str) -> Result<PlaylistImport> {
        let id = parse_playlist_id(input)?;

        let paths = [
            format!("/api/v1/channel/{}", id),
            format!("/api/v1/playlists/{}", id),
            format!("/api/v1/spotify/playlists/{}", id),
        ];

        for path in &paths {
            match self.freefy.fetch_path(path).await {
                Ok(body) => {
                    let (items, meta) = extract_track_items(&body);
                    let songs = self.playable(&items);
                    if songs.is_empty() {
                        debug!(path = %path, "Endpoint had no playable songs");
                        continue;
                    }
                    info!(playlist = %id, path = %path, songs = songs.len(), "Imported playlist");
                    return Ok(PlaylistImport {
                        songs,
                        playlist: playlist_info(meta),
                        note: None,
                    });
                }
                Err(e) => debug!(path = %path, error = %e, "Playlist endpoint failed"),
            }
        }

        warn!(playlist = %id, "Playlist not reachable, serving discover channel");
        let body = self.freefy.fetch_path("/api/v1/channel/discover").await?;
        let (items, _) = extract_track_items(&body);
        let songs = self.playable(&items);
        if songs.is_empty() {
            return Err(CatalogError::NotFound(format!("playlist {}", id)));
        }

        Ok(PlaylistImport {
            songs,
            playlist: PlaylistInfo {
                name: DEFAULT_PLAYLIST_NAME.to_string(),
                description: FALLBACK_DESCRIPTION.to_string(),
                image: None,
            },
            note: Some(FALLBACK_NOTE.to_string()),
        })
    }

    fn playable(&self, items: &[serde_json::Value]) -> Vec<Song> {
        let mut songs = self.freefy.normalize_all(items);
        songs.truncate(IMPORT_LIMIT);
        songs
    }
}

fn playlist_info(meta: PlaylistMeta) -> PlaylistInfo {
    PlaylistInfo {
        name: meta.name.unwrap_or_else(|| DEFAULT_PLAYLIST_NAME.to_string()),
        description: meta.description.unwrap_or_default(),
        image: meta.image,
    }
}
