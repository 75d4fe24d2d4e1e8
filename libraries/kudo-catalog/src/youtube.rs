//! YouTube video resolution
//!
//! Piped instances are tried first; the YouTube results page is scraped as
//! the last resort.

use crate::{
    client::{str_field, UpstreamClient, BROWSER_USER_AGENT},
    error::Result,
};
use regex::Regex;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

fn watch_param() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[?&]v=([A-Za-z0-9_-]{11})").expect("valid regex"))
}

fn short_link() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"youtu\.be/([A-Za-z0-9_-]{11})").expect("valid regex"))
}

fn bare_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid regex"))
}

fn embedded_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""videoId":"([A-Za-z0-9_-]{11})""#).expect("valid regex"))
}

/// Extract an 11-character video id from a watch URL, a short link or a bare id
pub fn extract_video_id(source: &str) -> Option<String> {
    let source = source.trim();
    watch_param()
        .captures(source)
        .or_else(|| short_link().captures(source))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .or_else(|| bare_id().is_match(source).then(|| source.to_string()))
}

/// Resolves a free-text query to a YouTube video id
#[derive(Debug, Clone)]
pub struct YouTubeResolver {
    client: UpstreamClient,
    piped_instances: Vec<String>,
    youtube_url: String,
}

impl YouTubeResolver {
    /// `client` should carry the shorter lookup timeout
    pub fn new(client: UpstreamClient, piped_instances: Vec<String>, youtube_url: impl Into<String>) -> Self {
        Self {
            client,
            piped_instances: piped_instances
                .into_iter()
                .map(|url| url.trim_end_matches('/').to_string())
                .collect(),
            youtube_url: youtube_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve `query` to a video id
    ///
    /// Source failures are logged and skipped; `None` means no source matched.
    pub async fn resolve(&self, query: &str) -> Option<String> {
        for instance in &self.piped_instances {
            match self.piped(instance, query).await {
                Ok(Some(id)) => {
                    info!(query = %query, instance = %instance, video_id = %id, "Resolved via Piped");
                    return Some(id);
                }
                Ok(None) => debug!(instance = %instance, "Piped returned no match"),
                Err(e) => warn!(instance = %instance, error = %e, "Piped instance failed"),
            }
        }

        match self.scrape(query).await {
            Ok(Some(id)) => {
                info!(query = %query, video_id = %id, "Resolved via results page");
                Some(id)
            }
            Ok(None) => {
                debug!(query = %query, "Results page had no video id");
                None
            }
            Err(e) => {
                warn!(error = %e, "YouTube results page failed");
                None
            }
        }
    }

    async fn piped(&self, instance: &str, query: &str) -> Result<Option<String>> {
        let url = format!("{}/search", instance);
        let request = self
            .client
            .get(&url)
            .query(&[("q", query), ("filter", "music_songs")]);

        let body = self.client.json(request, &url).await?;
        Ok(body
            .get("items")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .and_then(|item| str_field(item, "url"))
            .and_then(extract_video_id))
    }

    async fn scrape(&self, query: &str) -> Result<Option<String>> {
        let url = format!("{}/results", self.youtube_url);
        let search = format!("{} official audio", query);
        let request = self
            .client
            .get(&url)
            .query(&[("search_query", search.as_str())])
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9");

        let html = self.client.text(request, &url).await?;
        Ok(embedded_id()
            .captures(&html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("/watch?list=PL1&v=4NRXx6U8ABQ").as_deref(),
            Some("4NRXx6U8ABQ")
        );
    }

    #[test]
    fn extracts_from_short_link_and_bare_id() {
        assert_eq!(extract_video_id("https://youtu.be/TUVcZfQe-Kw").as_deref(), Some("TUVcZfQe-Kw"));
        assert_eq!(extract_video_id(" kJQP7kiw5Fk ").as_deref(), Some("kJQP7kiw5Fk"));
    }

    #[test]
    fn rejects_non_video_sources() {
        assert_eq!(extract_video_id("https://cdn.example.com/song.mp3"), None);
        assert_eq!(extract_video_id("too-short"), None);
        assert_eq!(extract_video_id(""), None);
    }
}
