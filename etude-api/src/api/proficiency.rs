//! Proficiency gauge endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::db::proficiency;
use crate::error::{ApiError, ApiResult};
use crate::services::scoring;
use crate::AppState;

/// GET /proficiency
pub async fn get(State(state): State<AppState>) -> ApiResult<Json<f64>> {
    Ok(Json(proficiency::get(&state.db).await?))
}

/// Request body for PUT /proficiency
#[derive(Debug, Deserialize)]
pub struct UpdateProficiencyRequest {
    pub proficiency: f64,
}

/// PUT /proficiency
pub async fn set(
    State(state): State<AppState>,
    Json(req): Json<UpdateProficiencyRequest>,
) -> ApiResult<Json<Value>> {
    proficiency::set(&state.db, req.proficiency).await?;
    Ok(Json(json!({
        "message": "Proficiency updated successfully",
        "proficiency": req.proficiency,
    })))
}

/// Request body for POST /proficiency/calculate
#[derive(Debug, Deserialize)]
pub struct CalculateProficiencyRequest {
    pub audio: Vec<f64>,
    #[serde(default)]
    pub difficulty: i64,
    pub correct_pitches: Vec<Vec<f64>>,
}

/// Response body for POST /proficiency/calculate
#[derive(Debug, Serialize)]
pub struct CalculateProficiencyResponse {
    pub proficiency: f64,
}

/// POST /proficiency/calculate
///
/// Forwards the audio sample and reference pitches to the scoring
/// service together with the current gauge value. The updated value is
/// returned to the caller; persisting it is a separate PUT /proficiency.
pub async fn calculate(
    State(state): State<AppState>,
    Json(req): Json<CalculateProficiencyRequest>,
) -> ApiResult<Json<CalculateProficiencyResponse>> {
    for (i, pair) in req.correct_pitches.iter().enumerate() {
        if pair.len() != 2 {
            return Err(ApiError::BadRequest(format!(
                "correct_pitches[{}] must be an array of two floats",
                i
            )));
        }
    }

    let current = proficiency::get(&state.db).await?;

    let updated = scoring::calculate_proficiency(
        &state.http,
        &state.config.scoring_url,
        &req.audio,
        req.difficulty,
        current,
        &req.correct_pitches,
    )
    .await?;

    Ok(Json(CalculateProficiencyResponse { proficiency: updated }))
}
