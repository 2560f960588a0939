//! Proficiency gauge — singleton scalar skill estimate

use sqlx::SqlitePool;

use etude_common::{Error, Result};

/// Current proficiency value.
///
/// The singleton row is seeded at initialization; a missing row is
/// surfaced as an error rather than assumed away.
pub async fn get(pool: &SqlitePool) -> Result<f64> {
    let value: Option<f64> =
        sqlx::query_scalar("SELECT proficiency FROM user_proficiency WHERE singleton_key = 1")
            .fetch_optional(pool)
            .await?;

    value.ok_or_else(|| Error::NotInitialized("user proficiency row is missing".to_string()))
}

/// Overwrite the proficiency value. No range validation at this layer.
pub async fn set(pool: &SqlitePool, value: f64) -> Result<()> {
    sqlx::query(
        "INSERT INTO user_proficiency (singleton_key, proficiency) VALUES (1, ?)
         ON CONFLICT(singleton_key) DO UPDATE SET proficiency = excluded.proficiency",
    )
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}
