//! Append-only comments on content items.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Comment;

/// Append a comment against an item and return its id.
///
/// Fails with `NotFound` if the item does not exist. Comments are never
/// edited or deleted.
pub async fn add_comment(
    pool: &SqlitePool,
    author_id: i64,
    item_id: i64,
    text: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO comments (author_id, item_id, text)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(author_id)
    .bind(item_id)
    .bind(text)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_foreign_key_violation() {
                return DatabaseError::NotFound {
                    entity: "Item",
                    id: item_id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(result.last_insert_rowid())
}

/// List the comments on an item, oldest first.
pub async fn list_for_item(pool: &SqlitePool, item_id: i64) -> Result<Vec<Comment>> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, author_id, item_id, text, created_at
        FROM comments
        WHERE item_id = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(item_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
