//! Database initialization
//!
//! Creates the SQLite database on first run and brings the schema up
//! idempotently. Safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent, safe to call multiple times)
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    create_songs_table(pool).await?;
    create_sheets_table(pool).await?;
    create_favorites_table(pool).await?;
    create_search_history_table(pool).await?;
    create_difficulty_overrides_table(pool).await?;
    create_user_proficiency_table(pool).await?;
    Ok(())
}

/// Create the songs table
///
/// Catalog reference data: one row per song. Genre is stored as text and
/// validated on read; unknown values are a data error, never coerced.
pub async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            artist TEXT,
            genre TEXT NOT NULL,
            base_difficulty INTEGER,
            thumbnail TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_difficulty ON songs(base_difficulty)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the sheets table
///
/// Zero or more difficulty sheets per song; the sheet payload is opaque.
pub async fn create_sheets_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sheets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            song_id INTEGER NOT NULL REFERENCES songs(id),
            difficulty INTEGER NOT NULL,
            sheet TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sheets_song ON sheets(song_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the favorites table
///
/// One row per favorited song; order_key defines display order.
pub async fn create_favorites_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorites (
            song_id INTEGER PRIMARY KEY REFERENCES songs(id),
            order_key INTEGER NOT NULL,
            CHECK (order_key > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_favorites_order ON favorites(order_key)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the search_history table
///
/// Append-only log of search results with a denormalized display
/// snapshot. Recency ordering is (searched_at DESC, id DESC); id breaks
/// ties within a batch.
pub async fn create_search_history_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS search_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            song_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            artist TEXT,
            thumbnail TEXT,
            searched_at TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_search_history_recency ON search_history(searched_at DESC, id DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the difficulty_overrides table
///
/// Sparse per-song map from measure index to an overridden difficulty.
pub async fn create_difficulty_overrides_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS difficulty_overrides (
            song_id INTEGER NOT NULL REFERENCES songs(id),
            measure INTEGER NOT NULL,
            difficulty INTEGER NOT NULL,
            PRIMARY KEY (song_id, measure),
            CHECK (measure >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the user_proficiency singleton table and seed its one row
pub async fn create_user_proficiency_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_proficiency (
            singleton_key INTEGER PRIMARY KEY DEFAULT 1 CHECK (singleton_key = 1),
            proficiency REAL NOT NULL DEFAULT 0.0
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Seed the singleton if it doesn't exist
    sqlx::query("INSERT OR IGNORE INTO user_proficiency (singleton_key, proficiency) VALUES (1, 0.0)")
        .execute(pool)
        .await?;

    Ok(())
}
