//! Search history endpoints

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use etude_common::db::models::SongSummary;

use crate::db::history;
use crate::error::ApiResult;
use crate::AppState;

/// Query parameters for GET /history/searches
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Omitted or non-positive falls back to the default
    #[serde(default)]
    pub limit: i64,
}

/// GET /history/searches?limit=N
pub async fn recent_searches(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> ApiResult<Json<Vec<SongSummary>>> {
    Ok(Json(history::recent(&state.db, query.limit).await?))
}
