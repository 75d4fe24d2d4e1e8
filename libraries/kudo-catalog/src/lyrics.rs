//! LRCLIB lyrics adapter and LRC parsing

use crate::{
    client::{str_field, UpstreamClient},
    error::{CatalogError, Result},
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// One timed lyric line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Seconds from the start of the track
    pub time: f64,
    pub text: String,
}

/// Result of a lyrics lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LyricsOutcome {
    Synced(Vec<LyricLine>),
    Plain(String),
    NotFound,
}

fn timestamp() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[(\d{1,2}):(\d{2})[:.](\d{2,3})\](.*)$").expect("valid regex")
    })
}

/// Parse an LRC blob into time-ordered lines
///
/// Only the first timestamp on each line is used. A two-digit fraction is
/// hundredths, a three-digit fraction thousandths. Lines with no text after
/// the timestamp are dropped.
pub fn parse_lrc(blob: &str) -> Vec<LyricLine> {
    let mut lines: Vec<LyricLine> = blob
        .lines()
        .filter_map(|line| {
            let caps = timestamp().captures(line)?;
            let minutes: f64 = caps[1].parse().ok()?;
            let seconds: f64 = caps[2].parse().ok()?;
            let fraction = &caps[3];
            let fraction_value: f64 = fraction.parse().ok()?;
            let divisor = if fraction.len() == 3 { 1000.0 } else { 100.0 };

            let text = caps[4].trim();
            if text.is_empty() {
                return None;
            }

            Some(LyricLine {
                time: minutes * 60.0 + seconds + fraction_value / divisor,
                text: text.to_string(),
            })
        })
        .collect();

    lines.sort_by(|a, b| a.time.total_cmp(&b.time));
    lines
}

/// Client for LRCLIB
#[derive(Debug, Clone)]
pub struct LrcLibClient {
    client: UpstreamClient,
    base_url: String,
}

impl LrcLibClient {
    pub fn new(client: UpstreamClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Look up lyrics, exact match first and fuzzy search second
    ///
    /// Errors only when both lookups failed at the transport level; a miss
    /// is `LyricsOutcome::NotFound`.
    pub async fn lookup(&self, title: &str, artist: &str, duration: Option<u32>) -> Result<LyricsOutcome> {
        if title.trim().is_empty() || artist.trim().is_empty() {
            return Err(CatalogError::InvalidInput(
                "Title and artist are required".to_string(),
            ));
        }

        let exact = self.exact(title, artist, duration).await;
        let exact_failed = match exact {
            Ok(Some(outcome)) => return Ok(outcome),
            Ok(None) => false,
            Err(ref e) => {
                debug!(error = %e, "Exact lyrics lookup missed");
                e.is_transport()
            }
        };

        match self.search(title, artist).await {
            Ok(Some(outcome)) => Ok(outcome),
            Ok(None) => {
                info!(title = %title, artist = %artist, "Lyrics not found");
                Ok(LyricsOutcome::NotFound)
            }
            Err(e) if e.is_transport() && exact_failed => Err(e),
            Err(e) => {
                warn!(error = %e, "Lyrics search failed");
                Ok(LyricsOutcome::NotFound)
            }
        }
    }

    async fn exact(&self, title: &str, artist: &str, duration: Option<u32>) -> Result<Option<LyricsOutcome>> {
        let url = format!("{}/api/get", self.base_url);
        let mut params = vec![
            ("artist_name", artist.to_string()),
            ("track_name", title.to_string()),
        ];
        if let Some(duration) = duration.filter(|d| *d > 0) {
            params.push(("duration", duration.to_string()));
        }

        let body = self.client.json(self.client.get(&url).query(&params), &url).await?;
        Ok(outcome_from_record(&body))
    }

    async fn search(&self, title: &str, artist: &str) -> Result<Option<LyricsOutcome>> {
        let url = format!("{}/api/search", self.base_url);
        let query = format!("{} {}", artist, title);
        let body = self
            .client
            .json(self.client.get(&url).query(&[("q", query.as_str())]), &url)
            .await?;

        let Some(results) = body.as_array() else {
            return Ok(None);
        };
        let best = results
            .iter()
            .find(|r| str_field(r, "syncedLyrics").is_some())
            .or_else(|| results.first());

        Ok(best.and_then(outcome_from_record))
    }
}

/// Synced lyrics win over plain; a synced blob with no parseable lines
/// falls back to the plain text
fn outcome_from_record(record: &Value) -> Option<LyricsOutcome> {
    if let Some(synced) = str_field(record, "syncedLyrics") {
        let lines = parse_lrc(synced);
        if !lines.is_empty() {
            return Some(LyricsOutcome::Synced(lines));
        }
    }
    str_field(record, "plainLyrics").map(|plain| LyricsOutcome::Plain(plain.to_string()))
}
