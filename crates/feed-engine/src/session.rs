//! Per-user conversation state.

use std::collections::HashMap;
use std::sync::Arc;

use bot_core::MessageId;
use tokio::sync::{Mutex, RwLock};

/// What the next inbound message from a user means.
///
/// One state per user at a time; transitions overwrite, never merge. The
/// original two independent "waiting" flags collapse into this tagged
/// union, which makes the both-flags-set combination unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No pending intent.
    #[default]
    Idle,
    /// The next media message is an upload.
    AwaitingUpload,
    /// The next text message is a comment on this item.
    AwaitingComment { item_id: i64 },
}

/// Transient per-user session.
///
/// Not persisted; lost on restart by design. `current_item` is set whenever
/// an item is shown and survives `Idle` transitions until overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Pending-intent state.
    pub state: SessionState,
    /// The item the user is currently looking at.
    pub current_item: Option<i64>,
    /// Index into the user's own items while browsing their profile.
    pub profile_index: usize,
    /// The most recent feed/profile card, replaced when a new one is shown.
    pub last_card: Option<MessageId>,
}

impl Session {
    /// Create a fresh idle session.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Owned map from user id to that user's session.
///
/// Each session sits behind its own async mutex; an event handler holds the
/// user's mutex for the whole event, so two near-simultaneous events for
/// the same user are serialized while different users proceed in parallel.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<i64, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session handle for a user, creating it lazily.
    pub async fn session(&self, user_id: i64) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(&user_id) {
            return session.clone();
        }

        self.sessions
            .write()
            .await
            .entry(user_id)
            .or_default()
            .clone()
    }

    /// Number of users with a session.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no user has interacted yet.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
