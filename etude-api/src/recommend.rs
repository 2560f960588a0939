//! Recommendation selection policies
//!
//! Pure selection over the catalog and the proficiency gauge; performs no
//! writes. The random source is injected so fixed seeds reproduce
//! selections.

use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;

use etude_common::db::models::SongSummary;
use etude_common::Result;

use crate::db::proficiency;
use crate::services::listening::RecommendedTrack;

/// Default number of recommendations
pub const DEFAULT_COUNT: i64 = 5;
/// Default difficulty window half-width
pub const DEFAULT_TOLERANCE: i64 = 1;

/// Pick up to `count` songs whose base difficulty lies within `tolerance`
/// of the gauge value rounded to the nearest difficulty band
/// (half-away-from-zero).
///
/// Sampling is uniform without replacement; fewer matches than `count`
/// returns all of them. `count <= 0` and `tolerance < 0` fall back to the
/// defaults.
pub async fn select_by_proficiency<R: Rng + ?Sized>(
    pool: &SqlitePool,
    count: i64,
    tolerance: i64,
    rng: &mut R,
) -> Result<Vec<SongSummary>> {
    let count = if count <= 0 { DEFAULT_COUNT } else { count };
    let tolerance = if tolerance < 0 { DEFAULT_TOLERANCE } else { tolerance };

    let band = proficiency::get(pool).await?.round() as i64;
    let min_difficulty = band - tolerance;
    let max_difficulty = band + tolerance;

    let rows: Vec<(i64, String, Option<String>, Option<String>)> = sqlx::query_as(
        "SELECT id, title, artist, thumbnail
         FROM songs
         WHERE base_difficulty >= ? AND base_difficulty <= ?
         ORDER BY id ASC",
    )
    .bind(min_difficulty)
    .bind(max_difficulty)
    .fetch_all(pool)
    .await?;

    let matching: Vec<SongSummary> = rows
        .into_iter()
        .map(|(music_id, title, artist, thumbnail)| SongSummary {
            music_id,
            title,
            artist,
            thumbnail,
        })
        .collect();

    Ok(matching
        .choose_multiple(rng, count as usize)
        .cloned()
        .collect())
}

/// Uniform sample of `count` tracks without replacement.
///
/// Returns the input unchanged when it has no more than `count` items.
pub fn sample_tracks<R: Rng + ?Sized>(
    tracks: Vec<RecommendedTrack>,
    count: usize,
    rng: &mut R,
) -> Vec<RecommendedTrack> {
    if tracks.len() <= count {
        return tracks;
    }

    tracks.choose_multiple(rng, count).cloned().collect()
}
