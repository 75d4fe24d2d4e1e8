//! Catalog facade over every upstream

use crate::{
    channels::{Channel, TRENDING_PER_QUERY, TRENDING_QUERIES},
    client::UpstreamClient,
    config::UpstreamConfig,
    error::{CatalogError, Result},
    freefy::FreefyClient,
    lyrics::{LrcLibClient, LyricsOutcome},
    merge::{clamp_limit, filter_matching, finalize},
    saavn::SaavnClient,
    youtube::YouTubeResolver,
};
use async_trait::async_trait;
use kudo_core::{Song, SongSearch};
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{info, warn};

/// Songs plus the source that produced them
#[derive(Debug, Clone, Serialize)]
pub struct SongsPage {
    pub songs: Vec<Song>,
    /// `"search"` for text queries, otherwise the channel name
    pub source: String,
}

/// Result of resolving a catalog track to a YouTube video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeMatch {
    pub freefy_id: String,
    pub youtube_id: Option<String>,
    pub search_query: String,
    pub track_name: String,
    pub artist_name: String,
}

/// Entry point for song listings, search, lyrics and video resolution
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) saavn: SaavnClient,
    pub(crate) freefy: FreefyClient,
    lrclib: LrcLibClient,
    youtube: YouTubeResolver,
}

impl Catalog {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = UpstreamClient::new(config.timeout())?;
        let lookup_client = UpstreamClient::new(config.youtube_timeout())?;

        Ok(Self {
            saavn: SaavnClient::new(client.clone(), &config.saavn_url),
            freefy: FreefyClient::new(client.clone(), &config.freefy_url),
            lrclib: LrcLibClient::new(client, &config.lrclib_url),
            youtube: YouTubeResolver::new(
                lookup_client,
                config.piped_instances.clone(),
                &config.youtube_url,
            ),
        })
    }

    /// Song listing for `GET /songs`
    ///
    /// A non-empty `query` searches; otherwise `channel` (default trending)
    /// is listed. Upstream failures degrade to an empty page.
    pub async fn songs(&self, query: Option<&str>, channel: Option<&str>, limit: Option<usize>) -> SongsPage {
        let limit = clamp_limit(limit);
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        if let Some(query) = query {
            let songs = self.search(query, limit).await.unwrap_or_else(|e| {
                warn!(query = %query, error = %e, "Search failed, returning no songs");
                Vec::new()
            });
            return SongsPage {
                songs,
                source: "search".to_string(),
            };
        }

        let channel = channel.map(Channel::parse).unwrap_or_default();
        let songs = self.channel(channel, limit).await.unwrap_or_else(|e| {
            warn!(channel = %channel, error = %e, "Channel failed, returning no songs");
            Vec::new()
        });
        SongsPage {
            songs,
            source: channel.to_string(),
        }
    }

    /// Free-text search, JioSaavn first and the discover channel second
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Song>> {
        match self.saavn.search(query, limit).await {
            Ok(songs) => Ok(finalize(songs, limit)),
            Err(e) => {
                warn!(query = %query, error = %e, "JioSaavn search failed, filtering discover channel");
                let discover = self.freefy.channel("discover").await?;
                let songs = finalize(filter_matching(discover, query), limit);
                info!(query = %query, songs = songs.len(), "Search served from discover channel");
                Ok(songs)
            }
        }
    }

    /// List a channel
    pub async fn channel(&self, channel: Channel, limit: usize) -> Result<Vec<Song>> {
        let songs = match channel.freefy_slug() {
            Some(slug) => self.freefy.channel(slug).await?,
            None => {
                let mut songs = self.saavn.sample(&TRENDING_QUERIES, TRENDING_PER_QUERY).await;
                songs.shuffle(&mut rand::thread_rng());
                songs
            }
        };
        Ok(finalize(songs, limit))
    }

    /// Lyrics for a track
    pub async fn lyrics(&self, title: &str, artist: &str, duration: Option<u32>) -> Result<LyricsOutcome> {
        self.lrclib.lookup(title, artist, duration).await
    }

    /// Resolve a Freefy track id to a YouTube video id
    ///
    /// Fails when the track itself cannot be looked up; a track with no
    /// video match yields `youtube_id: None`.
    pub async fn resolve_youtube(&self, catalog_id: &str) -> Result<YouTubeMatch> {
        let catalog_id = catalog_id.trim();
        if catalog_id.is_empty() {
            return Err(CatalogError::InvalidInput("Track id is required".to_string()));
        }

        let track = self.freefy.track(catalog_id).await?;
        let search_query = format!("{} {}", track.artist, track.name).trim().to_string();
        let youtube_id = self.youtube.resolve(&search_query).await;

        Ok(YouTubeMatch {
            freefy_id: catalog_id.to_string(),
            youtube_id,
            search_query,
            track_name: track.name,
            artist_name: track.artist,
        })
    }
}

#[async_trait]
impl SongSearch for Catalog {
    async fn search_songs(&self, query: &str, limit: usize) -> kudo_core::Result<Vec<Song>> {
        Ok(self.search(query, clamp_limit(Some(limit))).await?)
    }
}
