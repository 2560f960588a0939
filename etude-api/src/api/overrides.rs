//! Per-measure difficulty override endpoints

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use etude_common::db::models::DifficultyOverride;

use crate::db::overrides;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// PUT /music/:music_id/difficulty-settings
///
/// Replaces the song's overrides wholesale; an empty body clears them.
pub async fn set_for_song(
    State(state): State<AppState>,
    Path(music_id): Path<i64>,
    Json(settings): Json<Vec<DifficultyOverride>>,
) -> ApiResult<Json<Value>> {
    if music_id <= 0 {
        return Err(ApiError::BadRequest("music_id must be positive".to_string()));
    }

    overrides::set_for_song(&state.db, music_id, &settings).await?;
    Ok(Json(json!({
        "message": format!("Difficulty settings for music_id {} updated successfully", music_id)
    })))
}

/// GET /music/:music_id/difficulty-settings
pub async fn get_for_song(
    State(state): State<AppState>,
    Path(music_id): Path<i64>,
) -> ApiResult<Json<Vec<DifficultyOverride>>> {
    if music_id <= 0 {
        return Err(ApiError::BadRequest("music_id must be positive".to_string()));
    }

    Ok(Json(overrides::get_for_song(&state.db, music_id).await?))
}
