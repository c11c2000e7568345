//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user in the system, identified by their platform account id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Stable platform account id.
    pub id: i64,
    /// Display name, if the platform exposed one.
    pub username: Option<String>,
}

/// An uploaded content item.
///
/// `likes` and `dislikes` are derived counters: they always equal the
/// number of reaction rows of the matching kind referencing this item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Auto-incrementing id.
    pub id: i64,
    /// Owner, set once at creation.
    pub owner_id: i64,
    /// Opaque media handle (platform file id), never the bytes.
    pub payload_ref: String,
    /// Optional caption text.
    pub caption: Option<String>,
    /// Approve count.
    pub likes: i64,
    /// Disapprove count.
    pub dislikes: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// The kind of a reaction. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    /// A like.
    Approve,
    /// A dislike.
    Disapprove,
}

impl ReactionKind {
    /// Stable lowercase name, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Disapprove => "disapprove",
        }
    }
}

/// A recorded reaction. At most one per (viewer, item); immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Reaction {
    /// The reacting viewer.
    pub viewer_id: i64,
    /// The item reacted to.
    pub item_id: i64,
    /// Approve or disapprove.
    pub kind: ReactionKind,
    /// Creation timestamp.
    pub created_at: String,
}

/// A comment left on an item. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Auto-incrementing id.
    pub id: i64,
    /// Comment author.
    pub author_id: i64,
    /// The item commented on.
    pub item_id: i64,
    /// Comment text.
    pub text: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Aggregate statistics over a user's own items (from query).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OwnerStats {
    /// Number of uploaded items.
    pub items: i64,
    /// Sum of likes across all items.
    pub likes: i64,
    /// Sum of dislikes across all items.
    pub dislikes: i64,
}
