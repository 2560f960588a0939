//! Difficulty override store — sparse per-song map from measure to difficulty

use sqlx::SqlitePool;

use etude_common::db::models::DifficultyOverride;
use etude_common::Result;

/// Replace all overrides for one song.
///
/// Delete and inserts share one transaction; empty `overrides` clears
/// the song's entries.
pub async fn set_for_song(
    pool: &SqlitePool,
    music_id: i64,
    overrides: &[DifficultyOverride],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM difficulty_overrides WHERE song_id = ?")
        .bind(music_id)
        .execute(&mut *tx)
        .await?;

    for o in overrides {
        sqlx::query(
            "INSERT INTO difficulty_overrides (song_id, measure, difficulty) VALUES (?, ?, ?)",
        )
        .bind(music_id)
        .bind(o.measure)
        .bind(o.difficulty)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!(music_id, count = overrides.len(), "Replaced difficulty overrides");
    Ok(())
}

/// Overrides for one song, ordered by measure ascending
pub async fn get_for_song(pool: &SqlitePool, music_id: i64) -> Result<Vec<DifficultyOverride>> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT measure, difficulty
         FROM difficulty_overrides
         WHERE song_id = ?
         ORDER BY measure ASC",
    )
    .bind(music_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(measure, difficulty)| DifficultyOverride { measure, difficulty })
        .collect())
}
