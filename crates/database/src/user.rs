//! User registration and lookups.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::User;

/// Register a user, creating the row on first contact.
///
/// Idempotent upsert: calling this again is a no-op unless a new non-empty
/// username is supplied, in which case the stored name is refreshed. An
/// existing username is never overwritten with empty input.
pub async fn register_user(pool: &SqlitePool, id: i64, username: Option<&str>) -> Result<()> {
    // Normalize "" to NULL so the COALESCE below keeps the old name.
    let username = username.map(str::trim).filter(|name| !name.is_empty());

    sqlx::query(
        r#"
        INSERT INTO users (id, username)
        VALUES (?, ?)
        ON CONFLICT(id) DO UPDATE SET
            username = COALESCE(excluded.username, users.username)
        "#,
    )
    .bind(id)
    .bind(username)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a user by id.
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
