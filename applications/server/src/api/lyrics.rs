/// Lyrics API routes
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kudo_catalog::{LyricLine, LyricsOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LyricsQuery {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Seconds; fractional values are rounded
    pub duration: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<Vec<LyricLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_lyrics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LyricsResponse {
    fn failure(error: &str) -> Self {
        Self {
            success: false,
            lyrics: None,
            plain_lyrics: None,
            synced: None,
            error: Some(error.to_string()),
        }
    }
}

impl From<LyricsOutcome> for LyricsResponse {
    fn from(outcome: LyricsOutcome) -> Self {
        match outcome {
            LyricsOutcome::Synced(lines) => Self {
                success: true,
                lyrics: Some(lines),
                plain_lyrics: None,
                synced: Some(true),
                error: None,
            },
            LyricsOutcome::Plain(text) => Self {
                success: true,
                lyrics: None,
                plain_lyrics: Some(text),
                synced: Some(false),
                error: None,
            },
            LyricsOutcome::NotFound => Self::failure("Lyrics not found"),
        }
    }
}

/// GET /api/lyrics?title=&artist=&duration=
pub async fn get_lyrics(
    State(app_state): State<AppState>,
    Query(params): Query<LyricsQuery>,
) -> Response {
    let title = params.title.as_deref().map(str::trim).unwrap_or_default();
    let artist = params.artist.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() || artist.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(LyricsResponse::failure("Title and artist are required")),
        )
            .into_response();
    }

    let duration = params
        .duration
        .as_deref()
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0)
        .map(|d| d.round() as u32);

    match app_state.catalog.lyrics(title, artist, duration).await {
        Ok(outcome) => Json(LyricsResponse::from(outcome)).into_response(),
        Err(e) => {
            tracing::error!(title = %title, artist = %artist, error = %e, "Lyrics fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LyricsResponse::failure("Failed to fetch lyrics")),
            )
                .into_response()
        }
    }
}
