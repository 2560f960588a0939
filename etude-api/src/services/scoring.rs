//! External proficiency scoring service client
//!
//! The service receives an audio sample, a declared difficulty, the
//! reference pitch pairs and the current proficiency, and returns an
//! updated proficiency estimate. Failures are surfaced, never retried.

use serde::{Deserialize, Serialize};

use etude_common::{Error, Result};

/// Sampling rate the scoring service expects audio to be captured at
const SCORING_SAMPLE_RATE: f64 = 48000.0;

#[derive(Debug, Serialize)]
struct ScoringRequest<'a> {
    audio: &'a [f64],
    difficulty: i64,
    current_proficiency: f64,
    correct_pitches: &'a [Vec<f64>],
    sampling_rate: f64,
}

#[derive(Debug, Deserialize)]
struct ScoringResponse {
    proficiency: f64,
}

/// Submit a practice take for scoring; returns the updated proficiency
pub async fn calculate_proficiency(
    http: &reqwest::Client,
    scoring_url: &str,
    audio: &[f64],
    difficulty: i64,
    current_proficiency: f64,
    correct_pitches: &[Vec<f64>],
) -> Result<f64> {
    let url = format!("{}/calculate_proficiency", scoring_url.trim_end_matches('/'));

    let response = http
        .post(&url)
        .json(&ScoringRequest {
            audio,
            difficulty,
            current_proficiency,
            correct_pitches,
            sampling_rate: SCORING_SAMPLE_RATE,
        })
        .send()
        .await
        .map_err(|e| Error::Upstream(format!("scoring service request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream(format!(
            "scoring service returned {}: {}",
            status, body
        )));
    }

    let parsed: ScoringResponse = response
        .json()
        .await
        .map_err(|e| Error::Upstream(format!("invalid scoring service response: {}", e)))?;

    Ok(parsed.proficiency)
}
