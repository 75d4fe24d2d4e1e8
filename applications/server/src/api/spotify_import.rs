/// Playlist import API routes
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kudo_catalog::{CatalogError, PlaylistImport};
use serde::{Deserialize, Serialize};
use serde_json::json;

const IMPORT_FAILED: &str = "Could not import playlist. The Spotify playlist API may be temporarily unavailable. Please try again later or create a playlist manually.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportQuery {
    /// Bare id, `open.spotify.com/playlist/...` URL or `spotify:playlist:` URI
    pub playlist_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub total: usize,
    #[serde(flatten)]
    pub import: PlaylistImport,
}

/// GET /api/spotify-import?playlistId=
///
/// An unreachable playlist is reported with `success: false` and status 200.
pub async fn import_playlist(
    State(app_state): State<AppState>,
    Query(params): Query<ImportQuery>,
) -> Response {
    let input = params.playlist_id.unwrap_or_default();

    match app_state.catalog.import_playlist(&input).await {
        Ok(import) => {
            tracing::info!(
                playlist = %import.playlist.name,
                songs = import.songs.len(),
                fallback = import.note.is_some(),
                "Imported playlist"
            );
            Json(ImportResponse {
                success: true,
                total: import.songs.len(),
                import,
            })
            .into_response()
        }
        Err(CatalogError::InvalidInput(message)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": message })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(input = %input, error = %e, "Playlist import failed");
            Json(json!({ "success": false, "error": IMPORT_FAILED })).into_response()
        }
    }
}
