//! Content item storage: creation, lookups, feed candidate selection.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Item, OwnerStats};

/// Create a content item and return its fresh id.
///
/// Fails with `NotFound` if the owner is not a registered user. Counters
/// start at zero.
pub async fn create_item(
    pool: &SqlitePool,
    owner_id: i64,
    payload_ref: &str,
    caption: Option<&str>,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO items (owner_id, payload_ref, caption)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(owner_id)
    .bind(payload_ref)
    .bind(caption)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_foreign_key_violation() {
                return DatabaseError::NotFound {
                    entity: "User",
                    id: owner_id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(result.last_insert_rowid())
}

/// Get an item by id.
pub async fn get_item(pool: &SqlitePool, id: i64) -> Result<Item> {
    sqlx::query_as::<_, Item>(
        r#"
        SELECT id, owner_id, payload_ref, caption, likes, dislikes, created_at
        FROM items
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Item",
        id: id.to_string(),
    })
}

/// List a user's own items, newest first.
pub async fn list_owned(pool: &SqlitePool, owner_id: i64) -> Result<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(
        r#"
        SELECT id, owner_id, payload_ref, caption, likes, dislikes, created_at
        FROM items
        WHERE owner_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Pick one unseen item for a viewer, uniformly at random.
///
/// Candidates are items the viewer does not own and has not reacted to.
/// Returns `None` when the viewer has exhausted the pool; an item that was
/// shown but never reacted to stays in the pool and may reappear.
pub async fn random_unseen(pool: &SqlitePool, viewer_id: i64) -> Result<Option<Item>> {
    let item = sqlx::query_as::<_, Item>(
        r#"
        SELECT id, owner_id, payload_ref, caption, likes, dislikes, created_at
        FROM items
        WHERE owner_id != ?
          AND id NOT IN (
            SELECT item_id FROM reactions WHERE viewer_id = ?
          )
        ORDER BY RANDOM()
        LIMIT 1
        "#,
    )
    .bind(viewer_id)
    .bind(viewer_id)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

/// Aggregate statistics over a user's own items.
///
/// A user with zero items gets all-zero stats, not an error.
pub async fn owner_stats(pool: &SqlitePool, owner_id: i64) -> Result<OwnerStats> {
    let stats = sqlx::query_as::<_, OwnerStats>(
        r#"
        SELECT
            COUNT(*) AS items,
            COALESCE(SUM(likes), 0) AS likes,
            COALESCE(SUM(dislikes), 0) AS dislikes
        FROM items
        WHERE owner_id = ?
        "#,
    )
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(stats)
}

/// Count total items across all users.
pub async fn count_items(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM items
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
