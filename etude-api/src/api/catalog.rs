//! Search and song-detail endpoints

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use etude_common::db::models::{SearchQuery, Song, SongSummary};

use crate::db::{catalog, history};
use crate::error::ApiResult;
use crate::AppState;

/// POST /search
///
/// Runs one search predicate and records the result batch into the
/// search history. A history failure is logged without failing the
/// search itself.
pub async fn search(
    State(state): State<AppState>,
    Json(query): Json<SearchQuery>,
) -> ApiResult<Json<Vec<SongSummary>>> {
    let results = catalog::search(&state.db, &query).await?;

    if let Err(err) = history::record_batch(&state.db, &results, Utc::now()).await {
        warn!("Failed to add entries to search history: {}", err);
    }

    Ok(Json(results))
}

/// Request body for POST /select
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub music_id: i64,
}

/// POST /select
///
/// Full song metadata with its sheets.
pub async fn select(
    State(state): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> ApiResult<Json<Song>> {
    let song = catalog::find_by_id(&state.db, req.music_id).await?;
    Ok(Json(song))
}
