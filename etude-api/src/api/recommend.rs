//! Recommendation endpoints

use axum::extract::{Query, State};
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use etude_common::db::models::SongSummary;

use crate::error::ApiResult;
use crate::recommend;
use crate::services::listening::{self, RecommendedTrack};
use crate::AppState;

/// Query parameters for GET /recommendations/proficiency
#[derive(Debug, Deserialize)]
pub struct ProficiencyRecommendQuery {
    /// Omitted or non-positive falls back to the default count
    #[serde(default)]
    pub count: i64,
    /// Omitted falls back to the default; zero is a valid tolerance
    #[serde(default = "default_tolerance")]
    pub tolerance: i64,
}

fn default_tolerance() -> i64 {
    recommend::DEFAULT_TOLERANCE
}

/// GET /recommendations/proficiency?count&tolerance
pub async fn by_proficiency(
    State(state): State<AppState>,
    Query(query): Query<ProficiencyRecommendQuery>,
) -> ApiResult<Json<Vec<SongSummary>>> {
    let mut rng = StdRng::from_entropy();
    let picks =
        recommend::select_by_proficiency(&state.db, query.count, query.tolerance, &mut rng)
            .await?;
    Ok(Json(picks))
}

/// Request body for POST /recommendations/recent
#[derive(Debug, Deserialize)]
pub struct RecentRecommendRequest {
    pub access_token: String,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub count: i64,
}

/// POST /recommendations/recent
///
/// Samples from the user's recently played tracks on the listening
/// service.
pub async fn from_recently_played(
    State(state): State<AppState>,
    Json(req): Json<RecentRecommendRequest>,
) -> ApiResult<Json<Vec<RecommendedTrack>>> {
    let limit = if req.limit <= 0 {
        listening::DEFAULT_FETCH_LIMIT
    } else {
        req.limit
    };
    let count = if req.count <= 0 {
        listening::DEFAULT_RECOMMEND_COUNT
    } else {
        req.count
    };
    let count = count.min(limit);

    let tracks = listening::recently_played(
        &state.http,
        &state.config.listening_url,
        &req.access_token,
        limit,
    )
    .await?;

    let mut rng = StdRng::from_entropy();
    Ok(Json(recommend::sample_tracks(tracks, count as usize, &mut rng)))
}
