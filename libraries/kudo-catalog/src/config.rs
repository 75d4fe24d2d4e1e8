//! Upstream endpoints and timeouts

use serde::Deserialize;
use std::time::Duration;

/// Base URLs and request limits for every third-party upstream
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// JioSaavn mirror (search)
    pub saavn_url: String,

    /// Freefy (channels, track lookup, playlists)
    pub freefy_url: String,

    /// LRCLIB (lyrics)
    pub lrclib_url: String,

    /// YouTube (results page scrape)
    pub youtube_url: String,

    /// Piped API instances, tried in order
    pub piped_instances: Vec<String>,

    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,

    /// Per-attempt timeout for Piped and YouTube lookups in seconds
    pub youtube_timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn youtube_timeout(&self) -> Duration {
        Duration::from_secs(self.youtube_timeout_secs.max(1))
    }

    /// Point every upstream at the same base URL (tests against a mock server)
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            saavn_url: base.clone(),
            freefy_url: base.clone(),
            lrclib_url: base.clone(),
            youtube_url: base.clone(),
            piped_instances: vec![base],
            ..Self::default()
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            saavn_url: "https://jiosaavn-api-privatecvc2.vercel.app".to_string(),
            freefy_url: "https://freefy.app".to_string(),
            lrclib_url: "https://lrclib.net".to_string(),
            youtube_url: "https://www.youtube.com".to_string(),
            piped_instances: vec![
                "https://pipedapi.kavin.rocks".to_string(),
                "https://api.piped.yt".to_string(),
                "https://pipedapi.syncpundit.io".to_string(),
            ],
            timeout_secs: 8,
            youtube_timeout_secs: 5,
        }
    }
}
