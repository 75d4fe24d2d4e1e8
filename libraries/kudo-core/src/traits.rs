/// Core traits for Kudo
use crate::{error::Result, types::Song};
use async_trait::async_trait;

/// Free-text song search against a catalog
///
/// Implemented by the catalog adapter; the playback core uses it to fetch
/// auto-play continuation candidates without depending on any HTTP stack.
#[async_trait]
pub trait SongSearch: Send + Sync {
    /// Search songs matching `query`, returning at most `limit` playable songs
    async fn search_songs(&self, query: &str, limit: usize) -> Result<Vec<Song>>;
}
