//! Auto-play continuation
//!
//! When the queue runs dry the player searches the catalog for more songs
//! like the current one. The search is asynchronous, so the request captures
//! the track generation it was planned for; a result that lands after the
//! user moved on to another track is discarded.

use crate::store::PlayerStore;
use kudo_core::{Song, SongSearch};
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// A planned continuation search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationRequest {
    generation: u64,
    query: String,
    exclude: HashSet<String>,
}

/// What applying a continuation result did to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinuationOutcome {
    /// The current track changed while the search was in flight
    Stale,

    /// Search results were enqueued and playback advanced
    Enqueued(usize),

    /// A random sample song (by id) was enqueued and playback advanced
    Fallback(String),

    /// Neither search nor samples produced anything
    NothingToPlay,
}

impl ContinuationRequest {
    /// Plan a continuation for the store's current state
    ///
    /// Returns `None` when auto-play is disabled. The query is the last search
    /// query, else the current song's artist, else the first word of its title.
    pub fn plan(store: &PlayerStore) -> Option<Self> {
        if !store.auto_play_enabled() {
            return None;
        }

        let current = store.current_song();
        let query = Some(store.last_search_query().trim())
            .filter(|q| !q.is_empty())
            .or_else(|| current.map(|s| s.artist.trim()).filter(|a| !a.is_empty()))
            .or_else(|| current.and_then(|s| s.title.split_whitespace().next()))
            .unwrap_or_default()
            .to_string();

        let exclude = current
            .into_iter()
            .chain(store.history())
            .map(|s| s.id.clone())
            .collect();

        Some(Self {
            generation: store.track_generation(),
            query,
            exclude,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a song was already played (current or history)
    pub fn excludes(&self, song_id: &str) -> bool {
        self.exclude.contains(song_id)
    }
}

impl PlayerStore {
    /// Apply a continuation search result
    ///
    /// Search results not already played are enqueued (shuffled when shuffle
    /// is on). An error or empty result falls back to one random song from
    /// `fallback`, excluding the current song.
    pub fn apply_continuation(
        &mut self,
        request: &ContinuationRequest,
        result: kudo_core::Result<Vec<Song>>,
        fallback: &[Song],
    ) -> ContinuationOutcome {
        if request.generation != self.track_generation() {
            debug!(
                planned = request.generation,
                current = self.track_generation(),
                "Discarding stale continuation result"
            );
            return ContinuationOutcome::Stale;
        }

        let mut seen = HashSet::new();
        let mut songs: Vec<Song> = match result {
            Ok(songs) => songs
                .into_iter()
                .filter(|s| !request.excludes(&s.id) && seen.insert(s.id.clone()))
                .collect(),
            Err(e) => {
                warn!(query = %request.query, error = %e, "Continuation search failed");
                Vec::new()
            }
        };

        if !songs.is_empty() {
            if self.shuffle() {
                songs.shuffle(self.rng());
            }
            let count = songs.len();
            self.enqueue_many(songs);
            self.promote_from_queue();
            self.set_playing(true);
            info!(query = %request.query, count, "Auto-play continuation enqueued");
            return ContinuationOutcome::Enqueued(count);
        }

        let current_id = self.current_song().map(|s| s.id.clone());
        let candidates: Vec<&Song> = fallback
            .iter()
            .filter(|s| current_id.as_deref() != Some(s.id.as_str()))
            .collect();

        let Some(pick) = candidates.choose(self.rng()).map(|s| (*s).clone()) else {
            warn!("No continuation available");
            return ContinuationOutcome::NothingToPlay;
        };

        let id = pick.id.clone();
        self.enqueue(pick);
        self.promote_from_queue();
        self.set_playing(true);
        info!(song_id = %id, "Auto-play fell back to sample song");
        ContinuationOutcome::Fallback(id)
    }
}

/// Plan, search and apply a continuation in one call
///
/// Returns `None` when auto-play is disabled. An empty query skips the search
/// and goes straight to the fallback set.
pub async fn run_continuation<S>(
    store: &mut PlayerStore,
    search: &S,
    fallback: &[Song],
) -> Option<ContinuationOutcome>
where
    S: SongSearch + ?Sized,
{
    let request = ContinuationRequest::plan(store)?;
    let limit = store.config().continuation_limit;

    let result = if request.query().is_empty() {
        Ok(Vec::new())
    } else {
        debug!(query = %request.query(), limit, "Searching for continuation");
        search.search_songs(request.query(), limit).await
    };

    Some(store.apply_continuation(&request, result, fallback))
}
