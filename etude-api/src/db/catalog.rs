//! Catalog lookups — read-only reference data (songs and sheets)

use sqlx::SqlitePool;

use etude_common::db::models::{Genre, SearchQuery, Sheet, Song, SongSummary};
use etude_common::{Error, Result};

/// Load a full song with its sheets
pub async fn find_by_id(pool: &SqlitePool, music_id: i64) -> Result<Song> {
    let row: Option<(String, Option<String>, String, Option<i64>, Option<String>)> =
        sqlx::query_as(
            "SELECT title, artist, genre, base_difficulty, thumbnail FROM songs WHERE id = ?",
        )
        .bind(music_id)
        .fetch_optional(pool)
        .await?;

    let (title, artist, genre, base_difficulty, thumbnail) =
        row.ok_or_else(|| Error::NotFound(format!("music {} not found", music_id)))?;

    let genre: Genre = genre.parse()?;

    let sheets: Vec<(String, i64)> = sqlx::query_as(
        "SELECT sheet, difficulty FROM sheets WHERE song_id = ? ORDER BY difficulty ASC",
    )
    .bind(music_id)
    .fetch_all(pool)
    .await?;

    Ok(Song {
        music_id,
        title,
        artist,
        genre,
        base_difficulty,
        thumbnail,
        sheets: sheets
            .into_iter()
            .map(|(sheet, difficulty)| Sheet { sheet, difficulty })
            .collect(),
    })
}

/// Search songs by exactly one predicate
pub async fn search(pool: &SqlitePool, query: &SearchQuery) -> Result<Vec<SongSummary>> {
    let rows: Vec<(i64, String, Option<String>, Option<String>)> = match query {
        SearchQuery::Difficulty { difficulty } => {
            sqlx::query_as(
                "SELECT id, title, artist, thumbnail FROM songs WHERE base_difficulty = ? ORDER BY id ASC",
            )
            .bind(difficulty)
            .fetch_all(pool)
            .await?
        }
        SearchQuery::Keyword { text } => {
            let pattern = format!("%{}%", text);
            sqlx::query_as(
                "SELECT id, title, artist, thumbnail FROM songs WHERE title LIKE ? OR artist LIKE ? ORDER BY id ASC",
            )
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(pool)
            .await?
        }
        SearchQuery::Genre { genre } => {
            sqlx::query_as(
                "SELECT id, title, artist, thumbnail FROM songs WHERE genre = ? ORDER BY id ASC",
            )
            .bind(genre.to_string())
                .fetch_all(pool)
                .await?
        }
    };

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
