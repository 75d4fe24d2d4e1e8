//! Freefy adapter
//!
//! Freefy tracks reference YouTube videos rather than audio files, so a
//! normalized song carries `youtube_id` and `freefy_id` and no `audio_url`.

use crate::{
    client::{number_field, str_field, string_field, UpstreamClient, BROWSER_USER_AGENT},
    error::{CatalogError, Result},
    youtube::extract_video_id,
};
use kudo_core::{types::placeholder_image, Song};
use reqwest::{
    header::{REFERER, USER_AGENT},
    RequestBuilder,
};
use serde_json::Value;
use tracing::{debug, info};

/// Minimal track metadata from the track lookup endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub name: String,
    pub artist: String,
}

/// Playlist-level metadata from a playlist or channel payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistMeta {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Client for the Freefy API
#[derive(Debug, Clone)]
pub struct FreefyClient {
    client: UpstreamClient,
    base_url: String,
}

impl FreefyClient {
    pub fn new(client: UpstreamClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a channel and normalize its tracks
    pub async fn channel(&self, slug: &str) -> Result<Vec<Song>> {
        let url = format!("{}/api/v1/channel/{}", self.base_url, slug);
        let body = self.fetch(&url).await?;
        let (items, _) = extract_track_items(&body);
        let songs = self.normalize_all(&items);

        info!(channel = %slug, raw = items.len(), songs = songs.len(), "Freefy channel");
        Ok(songs)
    }

    /// Look up a track's name and primary artist
    pub async fn track(&self, id: &str) -> Result<TrackInfo> {
        let url = format!("{}/api/v1/tracks/{}", self.base_url, id);
        let body = self.fetch(&url).await?;

        let track = body.get("track").unwrap_or(&body);
        let name = str_field(track, "name")
            .ok_or_else(|| CatalogError::NotFound(format!("track {}", id)))?
            .to_string();
        let artist = track
            .get("artists")
            .and_then(Value::as_array)
            .and_then(|artists| artists.first())
            .and_then(|a| str_field(a, "name"))
            .unwrap_or("")
            .to_string();

        Ok(TrackInfo { name, artist })
    }

    /// Fetch an arbitrary playlist-like payload by API path
    ///
    /// Returns the raw body; callers pick tracks with [`extract_track_items`].
    pub async fn fetch_path(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        self.fetch(&url).await
    }

    /// Normalize raw items, dropping the ones without a name or video id
    pub fn normalize_all(&self, items: &[Value]) -> Vec<Song> {
        items
            .iter()
            .filter_map(|item| normalize_track(item, &self.base_url))
            .collect()
    }

    async fn fetch(&self, url: &str) -> Result<Value> {
        debug!(url = %url, "Freefy request");
        self.client.json(self.browser_request(url), url).await
    }

    fn browser_request(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(REFERER, format!("{}/", self.base_url))
    }
}

/// Locate track items and playlist metadata in a Freefy payload
///
/// The container is `channel`, `playlist` or `data` (later keys win); tracks
/// are searched under the container first and then under the top level. The
/// first candidate array with at least one track-like item wins.
pub fn extract_track_items(body: &Value) -> (Vec<Value>, PlaylistMeta) {
    let container = ["channel", "playlist", "data"]
        .iter()
        .rev()
        .find_map(|key| body.get(*key).filter(|v| v.is_object()))
        .unwrap_or(body);

    let meta = PlaylistMeta {
        name: str_field(container, "name").map(str::to_string),
        description: str_field(container, "description").map(str::to_string),
        image: str_field(container, "image").map(str::to_string),
    };

    let candidates = [
        container.pointer("/content/data"),
        container.pointer("/tracks/data"),
        container.get("tracks"),
        container.get("songs"),
        container.get("items"),
        body.pointer("/content/data"),
        body.pointer("/tracks/data"),
        body.get("data"),
        Some(body),
    ];

    let items = candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| is_track_like(item))
                .cloned()
                .collect::<Vec<_>>()
        })
        .find(|items| !items.is_empty())
        .unwrap_or_default();

    (items, meta)
}

fn is_track_like(item: &Value) -> bool {
    str_field(item, "model_type") == Some("track")
        || item.get("src").is_some()
        || item.get("name").is_some()
        || item.get("track").is_some_and(Value::is_object)
}

/// Normalize one Freefy item (a track or an item wrapping it under `track`)
pub fn normalize_track(item: &Value, base_url: &str) -> Option<Song> {
    let track = item.get("track").filter(|t| t.is_object()).unwrap_or(item);

    let title = str_field(track, "name")?;
    let youtube_id = str_field(track, "src")
        .and_then(extract_video_id)
        .or_else(|| str_field(track, "youtube_id").and_then(extract_video_id))?;

    let freefy_id = string_field(track, "id");
    let id = freefy_id.clone().unwrap_or_else(|| youtube_id.clone());

    let artists: Vec<&str> = track
        .get("artists")
        .and_then(Value::as_array)
        .map(|artists| artists.iter().filter_map(|a| str_field(a, "name")).collect())
        .unwrap_or_default();
    let artist = if artists.is_empty() {
        "Unknown Artist".to_string()
    } else {
        artists.join(", ")
    };

    let first_artist = track
        .get("artists")
        .and_then(Value::as_array)
        .and_then(|a| a.first());
    let image = track
        .get("album")
        .and_then(|album| str_field(album, "image"))
        .or_else(|| str_field(track, "image"))
        .or_else(|| first_artist.and_then(|a| str_field(a, "image_small")))
        .or_else(|| first_artist.and_then(|a| str_field(a, "image")))
        .map(|url| absolute_image(url, base_url))
        .unwrap_or_else(|| placeholder_image(&id));

    let mut song = Song::new(id, title, artist)
        .with_image(image)
        .with_youtube_id(youtube_id);
    if let Some(freefy_id) = freefy_id {
        song = song.with_freefy_id(freefy_id);
    }
    if let Some(album) = track.get("album").and_then(|a| str_field(a, "name")) {
        song = song.with_album(album);
    }
    if let Some(ms) = number_field(track, "duration").filter(|d| *d > 0.0) {
        song = song.with_duration((ms / 1000.0).round() as u32);
    }
    Some(song)
}

/// Upgrade Spotify CDN thumbnails and resolve relative paths
pub fn absolute_image(url: &str, base_url: &str) -> String {
    let upgraded = url.replace("ab67616d00001e02", "ab67616d0000b273");
    if upgraded.starts_with("http://") || upgraded.starts_with("https://") {
        upgraded
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), upgraded.trim_start_matches('/'))
    }
}
