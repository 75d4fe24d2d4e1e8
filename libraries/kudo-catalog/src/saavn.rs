//! JioSaavn mirror adapter
//!
//! Search results carry direct audio links (`downloadUrl`), so every song
//! from this upstream is playable without a YouTube lookup.

use crate::{
    client::{number_field, str_field, string_field, UpstreamClient},
    error::{CatalogError, Result},
};
use kudo_core::{types::placeholder_image, Song};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Client for the JioSaavn search mirror
#[derive(Debug, Clone)]
pub struct SaavnClient {
    client: UpstreamClient,
    base_url: String,
}

impl SaavnClient {
    pub fn new(client: UpstreamClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Search songs by free text
    ///
    /// Fails when the body is not JSON or carries no recognizable track list;
    /// a recognized but empty list is `Ok(vec![])`.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Song>> {
        let url = format!("{}/search/songs", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("query", query.to_string()), ("limit", limit.to_string())]);

        let body = self.client.json(request, &url).await?;
        let tracks = extract_tracks(&body)
            .ok_or_else(|| CatalogError::Parse(format!("{}: no track list in response", url)))?;

        let songs: Vec<Song> = tracks.iter().filter_map(normalize_track).collect();
        info!(query = %query, raw = tracks.len(), songs = songs.len(), "JioSaavn search");
        Ok(songs)
    }

    /// Run several searches in sequence and concatenate the results
    ///
    /// Failed queries are skipped.
    pub async fn sample(&self, queries: &[&str], per_query: usize) -> Vec<Song> {
        let mut songs = Vec::new();
        for query in queries {
            match self.search(query, per_query).await {
                Ok(found) => songs.extend(found),
                Err(e) => warn!(query = %query, error = %e, "Sample query failed"),
            }
        }
        debug!(total = songs.len(), "Sampled songs");
        songs
    }
}

/// Locate the track array under the known response shapes
pub fn extract_tracks(body: &Value) -> Option<&Vec<Value>> {
    body.pointer("/data/results")
        .and_then(Value::as_array)
        .or_else(|| body.get("results").and_then(Value::as_array))
        .or_else(|| body.get("data").and_then(Value::as_array))
        .or_else(|| body.get("songs").and_then(Value::as_array))
        .or_else(|| body.as_array())
}

/// Normalize one raw JioSaavn record
///
/// Requires a name and at least one download link.
pub fn normalize_track(track: &Value) -> Option<Song> {
    let title = str_field(track, "name").or_else(|| str_field(track, "title"))?;
    let audio_url = track
        .get("downloadUrl")
        .and_then(Value::as_array)
        .and_then(|links| links.last())
        .and_then(link_of)?;

    let id = string_field(track, "id").unwrap_or_else(|| audio_url.clone());

    let image = match track.get("image") {
        Some(Value::Array(images)) => images.last().or(images.first()).and_then(link_of),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
    .map(|url| upgrade_image(&url))
    .unwrap_or_else(|| placeholder_image(&id));

    let artist = str_field(track, "primaryArtists")
        .map(str::to_string)
        .or_else(|| primary_artist_names(track))
        .unwrap_or_else(|| "Unknown Artist".to_string());

    let album = match track.get("album") {
        Some(Value::Object(_)) => track.get("album").and_then(|a| str_field(a, "name")),
        Some(Value::String(_)) => str_field(track, "album"),
        _ => None,
    };

    let mut song = Song::new(id, title, artist)
        .with_image(image)
        .with_audio_url(audio_url);
    if let Some(album) = album {
        song = song.with_album(album);
    }
    if let Some(duration) = number_field(track, "duration").filter(|d| *d > 0.0) {
        song = song.with_duration(duration.round() as u32);
    }
    Some(song)
}

/// Upgrade thumbnail sizes to the 500x500 variant
pub fn upgrade_image(url: &str) -> String {
    url.replace("150x150", "500x500").replace("50x50", "500x500")
}

fn link_of(entry: &Value) -> Option<String> {
    str_field(entry, "link")
        .or_else(|| str_field(entry, "url"))
        .map(str::to_string)
}

fn primary_artist_names(track: &Value) -> Option<String> {
    let names: Vec<&str> = track
        .pointer("/artists/primary")?
        .as_array()?
        .iter()
        .filter_map(|a| str_field(a, "name"))
        .collect();
    (!names.is_empty()).then(|| names.join(", "))
}
