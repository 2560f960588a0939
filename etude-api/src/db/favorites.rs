//! Favorites store — a single ordered list of catalog entries

use sqlx::SqlitePool;

use etude_common::db::models::SongSummary;
use etude_common::{Error, Result};

/// Append a song to the end of the favorites list.
///
/// The new order key is max+1, or 1 when the list is empty. A song can be
/// favorited at most once: adding it again is a conflict and leaves the
/// existing row untouched.
pub async fn add(pool: &SqlitePool, music_id: i64) -> Result<()> {
    let max_order_key: Option<i64> = sqlx::query_scalar("SELECT MAX(order_key) FROM favorites")
        .fetch_one(pool)
        .await?;

    let new_order_key = max_order_key.unwrap_or(0) + 1;

    let result = sqlx::query("INSERT INTO favorites (song_id, order_key) VALUES (?, ?)")
        .bind(music_id)
        .bind(new_order_key)
        .execute(pool)
        .await;

    match result {
        Ok(_) => {
            tracing::debug!(music_id, order_key = new_order_key, "Added favorite");
            Ok(())
        }
        Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => Err(
            Error::Conflict(format!("music {} is already favorited", music_id)),
        ),
        Err(err) => Err(err.into()),
    }
}

/// All favorites in display order, joined with the catalog
pub async fn list(pool: &SqlitePool) -> Result<Vec<SongSummary>> {
    let rows: Vec<(i64, String, Option<String>, Option<String>)> = sqlx::query_as(
        "SELECT s.id, s.title, s.artist, s.thumbnail
         FROM songs s
         JOIN favorites f ON s.id = f.song_id
         ORDER BY f.order_key ASC",
    )
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

/// Replace the whole favorites list with `music_ids`, assigning order
/// keys 1..N in the given order.
///
/// Delete and inserts share one transaction: on any failure the prior
/// list is left fully intact.
pub async fn set_all(pool: &SqlitePool, music_ids: &[i64]) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM favorites")
        .execute(&mut *tx)
        .await?;

    for (i, music_id) in music_ids.iter().enumerate() {
        sqlx::query("INSERT INTO favorites (song_id, order_key) VALUES (?, ?)")
            .bind(music_id)
            .bind(i as i64 + 1)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::debug!(count = music_ids.len(), "Replaced favorites list");
    Ok(())
}
