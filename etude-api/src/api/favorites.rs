//! Favorites endpoints

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use etude_common::db::models::SongSummary;

use crate::db::favorites;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Request body for POST /favorites
#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub music_id: i64,
}

/// Request body for PUT /favorites
#[derive(Debug, Deserialize)]
pub struct SetFavoritesRequest {
    pub music_ids: Vec<i64>,
}

/// POST /favorites
///
/// Appends a song to the end of the list. Adding an already-favorited
/// song is a 409.
pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<AddFavoriteRequest>,
) -> ApiResult<Json<Value>> {
    if req.music_id <= 0 {
        return Err(ApiError::BadRequest("music_id must be positive".to_string()));
    }

    favorites::add(&state.db, req.music_id).await?;
    Ok(Json(json!({ "message": "Favorite added successfully" })))
}

/// GET /favorites
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<SongSummary>>> {
    Ok(Json(favorites::list(&state.db).await?))
}

/// PUT /favorites
///
/// Replaces the entire list with the given ordering.
pub async fn set_all(
    State(state): State<AppState>,
    Json(req): Json<SetFavoritesRequest>,
) -> ApiResult<Json<Value>> {
    favorites::set_all(&state.db, &req.music_ids).await?;
    Ok(Json(json!({ "message": "Favorites set successfully" })))
}
