//! The reaction ledger: at-most-once reactions with derived counters.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Reaction, ReactionKind};

/// Record a reaction exactly once for a (viewer, item) pair.
///
/// The reaction insert and the counter increment are one transaction: both
/// land or neither does. A duplicate reaction trips the schema's UNIQUE
/// constraint and returns `AlreadyExists` with the counters untouched; a
/// missing item returns `NotFound`.
pub async fn record_reaction(
    pool: &SqlitePool,
    viewer_id: i64,
    item_id: i64,
    kind: ReactionKind,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO reactions (viewer_id, item_id, kind)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(viewer_id)
    .bind(item_id)
    .bind(kind)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Reaction",
                    id: format!("{}:{}", viewer_id, item_id),
                };
            }
            if db_err.is_foreign_key_violation() {
                return DatabaseError::NotFound {
                    entity: "Item",
                    id: item_id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    let update = match kind {
        ReactionKind::Approve => {
            r#"
            UPDATE items SET likes = likes + 1 WHERE id = ?
            "#
        }
        ReactionKind::Disapprove => {
            r#"
            UPDATE items SET dislikes = dislikes + 1 WHERE id = ?
            "#
        }
    };

    let result = sqlx::query(update).bind(item_id).execute(&mut *tx).await?;
    if result.rows_affected() == 0 {
        // Dropping the transaction rolls the insert back.
        return Err(DatabaseError::NotFound {
            entity: "Item",
            id: item_id.to_string(),
        });
    }

    tx.commit().await?;

    tracing::debug!(
        "Recorded {} by viewer {} on item {}",
        kind.as_str(),
        viewer_id,
        item_id
    );

    Ok(())
}

/// Look up the reaction a viewer left on an item, if any.
pub async fn find_reaction(
    pool: &SqlitePool,
    viewer_id: i64,
    item_id: i64,
) -> Result<Option<Reaction>> {
    let reaction = sqlx::query_as::<_, Reaction>(
        r#"
        SELECT viewer_id, item_id, kind, created_at
        FROM reactions
        WHERE viewer_id = ? AND item_id = ?
        "#,
    )
    .bind(viewer_id)
    .bind(item_id)
    .fetch_optional(pool)
    .await?;

    Ok(reaction)
}

/// Count reaction rows of one kind referencing an item.
///
/// Ground truth for the derived counters on the item row.
pub async fn count_for_item(pool: &SqlitePool, item_id: i64, kind: ReactionKind) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM reactions
        WHERE item_id = ? AND kind = ?
        "#,
    )
    .bind(item_id)
    .bind(kind)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
