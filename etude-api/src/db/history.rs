//! Search history log — append-only, size-bounded, newest first

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::warn;

use etude_common::db::models::SongSummary;
use etude_common::Result;

/// Maximum rows retained after pruning
pub const HISTORY_RETENTION: i64 = 20;
/// Default number of entries returned by `recent`
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Record one search's results as a batch sharing a single timestamp.
///
/// The inserts run in one transaction. Pruning runs afterwards as a
/// separate best-effort step, so the log may transiently exceed the
/// retention bound between the two commits; a prune failure is logged
/// and does not fail the record operation.
pub async fn record_batch(
    pool: &SqlitePool,
    entries: &[SongSummary],
    now: DateTime<Utc>,
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    for entry in entries {
        sqlx::query(
            "INSERT INTO search_history (song_id, title, artist, thumbnail, searched_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(entry.music_id)
        .bind(&entry.title)
        .bind(&entry.artist)
        .bind(&entry.thumbnail)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    if let Err(err) = prune(pool, HISTORY_RETENTION).await {
        warn!("Failed to prune search history: {}", err);
    }

    tracing::debug!(count = entries.len(), "Recorded search history batch");
    Ok(())
}

/// Delete everything but the `keep_count` most recent entries.
///
/// Recency is (searched_at DESC, id DESC); id breaks ties within a batch
/// that shares one timestamp. Pruning an already-pruned table is a no-op.
pub async fn prune(pool: &SqlitePool, keep_count: i64) -> Result<()> {
    sqlx::query(
        "DELETE FROM search_history
         WHERE id NOT IN (
             SELECT id
             FROM search_history
             ORDER BY searched_at DESC, id DESC
             LIMIT ?
         )",
    )
    .bind(keep_count)
    .execute(pool)
    .await?;

    Ok(())
}

/// Most recent history entries, newest first.
///
/// `limit <= 0` falls back to the default.
pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<SongSummary>> {
    let limit = if limit <= 0 { DEFAULT_RECENT_LIMIT } else { limit };

    let rows: Vec<(i64, String, Option<String>, Option<String>)> = sqlx::query_as(
        "SELECT song_id, title, artist, thumbnail
         FROM search_history
         ORDER BY searched_at DESC, id DESC
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(music_id, title, artist, thumbnail)| SongSummary {
            music_id,
            title,
            artist,
            thumbnail,
        })
        .collect())
}
