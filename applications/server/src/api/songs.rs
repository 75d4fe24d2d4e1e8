/// Song listing API routes
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use kudo_core::Song;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct SongsQuery {
    pub q: Option<String>,
    /// Alias of `q`
    pub query: Option<String>,
    pub channel: Option<String>,
    /// Lenient: anything that is not a number means the default
    pub limit: Option<String>,
}

impl SongsQuery {
    fn search_text(&self) -> Option<&str> {
        [self.q.as_deref(), self.query.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|text| !text.is_empty())
    }

    fn limit(&self) -> Option<usize> {
        self.limit.as_deref().and_then(|l| l.trim().parse().ok())
    }
}

#[derive(Debug, Serialize)]
pub struct SongsResponse {
    pub success: bool,
    pub songs: Vec<Song>,
    pub total: usize,
    pub source: String,
}

/// GET /api/songs?q=&query=&channel=&limit=
///
/// Upstream failures degrade to an empty list rather than an error.
pub async fn list_songs(
    State(app_state): State<AppState>,
    Query(params): Query<SongsQuery>,
) -> Json<SongsResponse> {
    let page = app_state
        .catalog
        .songs(params.search_text(), params.channel.as_deref(), params.limit())
        .await;

    tracing::debug!(source = %page.source, songs = page.songs.len(), "Listed songs");

    Json(SongsResponse {
        success: true,
        total: page.songs.len(),
        songs: page.songs,
        source: page.source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_prefers_q() {
        let params = SongsQuery {
            q: Some("starboy".to_string()),
            query: Some("levitating".to_string()),
            ..Default::default()
        };
        assert_eq!(params.search_text(), Some("starboy"));
    }

    #[test]
    fn test_blank_q_falls_back_to_query() {
        let params = SongsQuery {
            q: Some("  ".to_string()),
            query: Some("levitating".to_string()),
            ..Default::default()
        };
        assert_eq!(params.search_text(), Some("levitating"));
    }

    #[test]
    fn test_limit_is_lenient() {
        let mut params = SongsQuery::default();
        assert_eq!(params.limit(), None);

        params.limit = Some("12".to_string());
        assert_eq!(params.limit(), Some(12));

        params.limit = Some("lots".to_string());
        assert_eq!(params.limit(), None);
    }
}
