/// YouTube resolution API routes
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kudo_catalog::YouTubeMatch;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
pub struct YouTubeResponse {
    /// True only when a video id was found
    pub success: bool,
    #[serde(flatten)]
    pub result: YouTubeMatch,
}

/// GET /api/youtube/:catalog_id
pub async fn resolve_video(
    State(app_state): State<AppState>,
    Path(catalog_id): Path<String>,
) -> Response {
    match app_state.catalog.resolve_youtube(&catalog_id).await {
        Ok(result) => {
            if result.youtube_id.is_none() {
                tracing::info!(track = %catalog_id, query = %result.search_query, "No video found");
            }
            Json(YouTubeResponse {
                success: result.youtube_id.is_some(),
                result,
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(track = %catalog_id, error = %e, "Track lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Failed to get YouTube ID",
                    "youtubeId": null,
                })),
            )
                .into_response()
        }
    }
}
