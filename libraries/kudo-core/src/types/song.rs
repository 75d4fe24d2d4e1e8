/// Song domain type
use serde::{Deserialize, Serialize};

/// A playable song as returned by the catalog adapters
///
/// Field names serialize in camelCase so the JSON matches what the web
/// client persists in local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Identifier, unique within a result set
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist(s), possibly comma-joined
    pub artist: String,

    /// Album name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Cover image URL
    #[serde(default)]
    pub image: String,

    /// Direct audio URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    /// YouTube video identifier (may be resolved after selection)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,

    /// Upstream catalog id used to resolve a YouTube id later
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freefy_id: Option<String>,

    /// Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// Reference to the audio a media backend should load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioRef {
    /// Direct audio URL (audio element)
    Direct(String),

    /// YouTube video id (embedded player)
    YouTube(String),
}

impl Song {
    /// Create a song with a placeholder image and no audio reference
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            image: placeholder_image(&id),
            id,
            title: title.into(),
            artist: artist.into(),
            album: None,
            audio_url: None,
            youtube_id: None,
            freefy_id: None,
            duration: None,
        }
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    pub fn with_youtube_id(mut self, youtube_id: impl Into<String>) -> Self {
        self.youtube_id = Some(youtube_id.into());
        self
    }

    pub fn with_freefy_id(mut self, freefy_id: impl Into<String>) -> Self {
        self.freefy_id = Some(freefy_id.into());
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Audio reference for the media backend
    ///
    /// A direct URL wins over a YouTube id when both are present.
    pub fn audio_ref(&self) -> Option<AudioRef> {
        if let Some(url) = self.audio_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Some(AudioRef::Direct(url.to_string()));
        }
        self.youtube_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .map(|id| AudioRef::YouTube(id.to_string()))
    }

    /// Whether the song carries a non-empty audio reference
    pub fn is_playable(&self) -> bool {
        self.audio_ref().is_some()
    }

    /// Case-insensitive substring match against title and artist
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle) || self.artist.to_lowercase().contains(&needle)
    }
}

/// Deterministic placeholder artwork keyed by track id
pub fn placeholder_image(id: &str) -> String {
    format!("https://picsum.photos/seed/{}/300", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_without_audio_is_not_playable() {
        let song = Song::new("1", "Title", "Artist");
        assert!(!song.is_playable());
        assert_eq!(song.image, "https://picsum.photos/seed/1/300");
    }

    #[test]
    fn blank_audio_reference_is_not_playable() {
        let song = Song::new("1", "Title", "Artist").with_audio_url("  ");
        assert!(!song.is_playable());
    }

    #[test]
    fn direct_url_preferred_over_youtube() {
        let song = Song::new("1", "Title", "Artist")
            .with_youtube_id("dQw4w9WgXcQ")
            .with_audio_url("https://cdn.example.com/a.mp4");
        assert_eq!(
            song.audio_ref(),
            Some(AudioRef::Direct("https://cdn.example.com/a.mp4".to_string()))
        );
    }

    #[test]
    fn youtube_reference() {
        let song = Song::new("1", "Title", "Artist").with_youtube_id("dQw4w9WgXcQ");
        assert_eq!(song.audio_ref(), Some(AudioRef::YouTube("dQw4w9WgXcQ".to_string())));
    }

    #[test]
    fn json_uses_camel_case_and_skips_missing_fields() {
        let song = Song::new("1", "Title", "Artist").with_audio_url("https://a");
        let json = serde_json::to_value(&song).unwrap();
        assert_eq!(json["audioUrl"], "https://a");
        assert!(json.get("youtubeId").is_none());
        assert!(json.get("duration").is_none());

        let back: Song = serde_json::from_value(json).unwrap();
        assert_eq!(back, song);
    }

    #[test]
    fn matches_is_case_insensitive() {
        let song = Song::new("1", "Blinding Lights", "The Weeknd");
        assert!(song.matches("weeknd"));
        assert!(song.matches("LIGHTS"));
        assert!(!song.matches("taylor"));
    }
}
