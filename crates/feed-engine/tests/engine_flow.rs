//! End-to-end engine flows over an in-memory database.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use bot_core::{
    async_trait, ChatId, ChatSender, CommandKind, Menu, MessageId, TransportError, UserRef,
};
use database::{item, reaction, user, Database, ReactionKind};
use feed_engine::{EngineConfig, FeedEngine, SessionState};

/// Everything the engine pushed through the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Sent {
    Text {
        chat: i64,
        text: String,
        tags: Vec<String>,
    },
    Media {
        chat: i64,
        payload_ref: String,
        text: String,
        tags: Vec<String>,
    },
    Edit {
        chat: i64,
        message: i64,
        text: String,
    },
    Delete {
        chat: i64,
        message: i64,
    },
}

/// Sender that records every outbound operation.
#[derive(Debug, Default)]
struct RecordingSender {
    sent: Mutex<Vec<Sent>>,
    next_id: AtomicI64,
}

impl RecordingSender {
    fn record(&self, entry: Sent) {
        self.sent.lock().unwrap().push(entry);
    }

    fn log(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// All rendered texts/captions, in order.
    fn texts(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .map(|entry| match entry {
                Sent::Text { text, .. } => text,
                Sent::Media { text, .. } => text,
                Sent::Edit { text, .. } => text,
                Sent::Delete { .. } => String::new(),
            })
            .collect()
    }

    fn saw_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|text| text.contains(needle))
    }

    /// Payload refs of media cards, in order.
    fn media_refs(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter_map(|entry| match entry {
                Sent::Media { payload_ref, .. } => Some(payload_ref),
                _ => None,
            })
            .collect()
    }
}

fn menu_tags(menu: Option<&Menu>) -> Vec<String> {
    menu.map(|menu| {
        menu.rows
            .iter()
            .flatten()
            .map(|button| button.tag.clone())
            .collect()
    })
    .unwrap_or_default()
}

#[async_trait]
impl ChatSender for RecordingSender {
    async fn send_text(
        &self,
        chat: ChatId,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<MessageId, TransportError> {
        self.record(Sent::Text {
            chat: chat.0,
            text: text.to_string(),
            tags: menu_tags(menu),
        });
        Ok(MessageId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn send_media(
        &self,
        chat: ChatId,
        payload_ref: &str,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<MessageId, TransportError> {
        self.record(Sent::Media {
            chat: chat.0,
            payload_ref: payload_ref.to_string(),
            text: text.to_string(),
            tags: menu_tags(menu),
        });
        Ok(MessageId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn edit_text(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        _menu: Option<&Menu>,
    ) -> Result<(), TransportError> {
        self.record(Sent::Edit {
            chat: chat.0,
            message: message.0,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn delete_message(
        &self,
        chat: ChatId,
        message: MessageId,
    ) -> Result<(), TransportError> {
        self.record(Sent::Delete {
            chat: chat.0,
            message: message.0,
        });
        Ok(())
    }
}

async fn test_engine() -> FeedEngine<RecordingSender> {
    // A single connection keeps the in-memory database alive and shared.
    let db = Database::connect_with_pool_size("sqlite::memory:", 1)
        .await
        .unwrap();
    db.migrate().await.unwrap();
    FeedEngine::new(db, RecordingSender::default())
}

fn alice() -> UserRef {
    UserRef::named(1, "alice")
}

fn bob() -> UserRef {
    UserRef::named(2, "bob")
}

const ALICE_CHAT: ChatId = ChatId(1);
const BOB_CHAT: ChatId = ChatId(2);

/// Drive the full upload flow for a user.
async fn upload(
    engine: &FeedEngine<RecordingSender>,
    who: &UserRef,
    chat: ChatId,
    payload_ref: &str,
    caption: Option<&str>,
) {
    engine
        .on_button("upload", who, chat, Some(MessageId(900)))
        .await
        .unwrap();
    engine
        .on_media(payload_ref, caption, who, chat)
        .await
        .unwrap();
}

#[tokio::test]
async fn scenario_a_react_consumes_item_and_counts() {
    let engine = test_engine().await;
    upload(&engine, &alice(), ALICE_CHAT, "file-a", None).await;

    // Bob opens the feed and gets Alice's upload
    engine
        .on_button("view", &bob(), BOB_CHAT, Some(MessageId(901)))
        .await
        .unwrap();
    assert_eq!(engine.sender().media_refs().last().unwrap(), "file-a");

    let item_id = engine.session_snapshot(2).await.current_item.unwrap();

    // He approves it; the feed moves on and comes up empty
    engine
        .on_button("react:approve", &bob(), BOB_CHAT, Some(MessageId(902)))
        .await
        .unwrap();
    assert!(engine.sender().saw_text("Like counted!"));
    assert!(engine.sender().saw_text("rated everything"));

    let stored = item::get_item(engine.database().pool(), item_id)
        .await
        .unwrap();
    assert_eq!((stored.likes, stored.dislikes), (1, 0));
    assert!(item::random_unseen(engine.database().pool(), 2)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn scenario_b_second_reaction_rejected() {
    let engine = test_engine().await;
    upload(&engine, &alice(), ALICE_CHAT, "file-a", None).await;

    engine
        .on_button("view", &bob(), BOB_CHAT, Some(MessageId(901)))
        .await
        .unwrap();
    let item_id = engine.session_snapshot(2).await.current_item.unwrap();

    engine
        .on_button("react:approve", &bob(), BOB_CHAT, Some(MessageId(902)))
        .await
        .unwrap();
    // The exhausted feed did not overwrite the pointer, so a second tap
    // lands on the same item with the opposite kind
    engine
        .on_button("react:disapprove", &bob(), BOB_CHAT, Some(MessageId(903)))
        .await
        .unwrap();

    assert!(engine.sender().saw_text("already rated"));
    let stored = item::get_item(engine.database().pool(), item_id)
        .await
        .unwrap();
    assert_eq!((stored.likes, stored.dislikes), (1, 0));
}

#[tokio::test]
async fn scenario_c_empty_profile_is_not_an_error() {
    let engine = test_engine().await;

    engine
        .on_button("profile", &alice(), ALICE_CHAT, Some(MessageId(901)))
        .await
        .unwrap();

    assert!(engine.sender().saw_text("Nothing here yet"));
    let stats = item::owner_stats(engine.database().pool(), 1).await.unwrap();
    assert_eq!((stats.items, stats.likes, stats.dislikes), (0, 0, 0));
}

#[tokio::test]
async fn scenario_d_upload_rejects_text_then_accepts_media() {
    let engine = test_engine().await;

    engine
        .on_button("upload", &alice(), ALICE_CHAT, Some(MessageId(901)))
        .await
        .unwrap();
    assert_eq!(
        engine.session_snapshot(1).await.state,
        SessionState::AwaitingUpload
    );

    // Text while an image is expected: rejected, intent stands
    engine
        .on_text("here it comes", &alice(), ALICE_CHAT)
        .await
        .unwrap();
    assert!(engine.sender().saw_text("Please send an image"));
    assert_eq!(
        engine.session_snapshot(1).await.state,
        SessionState::AwaitingUpload
    );

    // The image lands and the intent completes
    engine
        .on_media("file-a", Some("inktober"), &alice(), ALICE_CHAT)
        .await
        .unwrap();
    assert!(engine.sender().saw_text("Your art is in"));
    assert_eq!(engine.session_snapshot(1).await.state, SessionState::Idle);

    let items = item::list_owned(engine.database().pool(), 1).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].caption.as_deref(), Some("inktober"));
}

#[tokio::test]
async fn scenario_e_profile_paging_clamps_at_both_ends() {
    let engine = test_engine().await;
    for n in 0..3 {
        upload(&engine, &alice(), ALICE_CHAT, &format!("file-{}", n), None).await;
    }

    engine
        .on_button("profile", &alice(), ALICE_CHAT, Some(MessageId(901)))
        .await
        .unwrap();
    assert_eq!(engine.session_snapshot(1).await.profile_index, 0);

    for _ in 0..2 {
        engine
            .on_button("profile:next", &alice(), ALICE_CHAT, Some(MessageId(902)))
            .await
            .unwrap();
    }
    assert_eq!(engine.session_snapshot(1).await.profile_index, 2);

    // Advancing at the last page is a no-op, no wrap
    engine
        .on_button("profile:next", &alice(), ALICE_CHAT, Some(MessageId(903)))
        .await
        .unwrap();
    assert_eq!(engine.session_snapshot(1).await.profile_index, 2);

    for _ in 0..3 {
        engine
            .on_button("profile:prev", &alice(), ALICE_CHAT, Some(MessageId(904)))
            .await
            .unwrap();
    }
    assert_eq!(engine.session_snapshot(1).await.profile_index, 0);

    // Re-entering the profile view starts back at the first page
    engine
        .on_button("profile:next", &alice(), ALICE_CHAT, Some(MessageId(905)))
        .await
        .unwrap();
    engine
        .on_button("profile", &alice(), ALICE_CHAT, Some(MessageId(906)))
        .await
        .unwrap();
    assert_eq!(engine.session_snapshot(1).await.profile_index, 0);
}

#[tokio::test]
async fn feed_never_serves_own_items() {
    let engine = test_engine().await;
    upload(&engine, &alice(), ALICE_CHAT, "file-a", None).await;

    engine
        .on_button("view", &alice(), ALICE_CHAT, Some(MessageId(901)))
        .await
        .unwrap();

    assert!(engine.sender().media_refs().is_empty());
    assert!(engine.sender().saw_text("rated everything"));
}

#[tokio::test]
async fn browsing_without_reacting_keeps_item_in_pool() {
    let engine = test_engine().await;
    upload(&engine, &alice(), ALICE_CHAT, "file-a", None).await;

    for _ in 0..3 {
        engine
            .on_button("view", &bob(), BOB_CHAT, Some(MessageId(901)))
            .await
            .unwrap();
    }

    // Same undecided item served every time
    assert_eq!(engine.sender().media_refs(), vec!["file-a"; 3]);
}

#[tokio::test]
async fn comment_flow_stores_and_continues_feed() {
    let engine = test_engine().await;
    upload(&engine, &alice(), ALICE_CHAT, "file-a", None).await;

    engine
        .on_button("view", &bob(), BOB_CHAT, Some(MessageId(901)))
        .await
        .unwrap();
    let item_id = engine.session_snapshot(2).await.current_item.unwrap();

    engine
        .on_button("comment:begin", &bob(), BOB_CHAT, Some(MessageId(902)))
        .await
        .unwrap();
    assert_eq!(
        engine.session_snapshot(2).await.state,
        SessionState::AwaitingComment { item_id }
    );

    // Media while text is expected: rejected, intent stands
    engine.on_media("file-x", None, &bob(), BOB_CHAT).await.unwrap();
    assert!(engine.sender().saw_text("Just text"));
    assert_eq!(
        engine.session_snapshot(2).await.state,
        SessionState::AwaitingComment { item_id }
    );

    engine
        .on_text("love the colors", &bob(), BOB_CHAT)
        .await
        .unwrap();
    assert!(engine.sender().saw_text("Comment added!"));
    assert_eq!(engine.session_snapshot(2).await.state, SessionState::Idle);

    let comments = database::comment::list_for_item(engine.database().pool(), item_id)
        .await
        .unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_id, 2);
    assert_eq!(comments[0].text, "love the colors");

    // Convenience continuation: the feed came back with another card.
    // Bob never reacted, so the undecided item is served again.
    let refs = engine.sender().media_refs();
    assert!(refs.len() >= 2);
    assert_eq!(refs.last().unwrap(), "file-a");
}

#[tokio::test]
async fn comment_with_nothing_open_is_refused() {
    let engine = test_engine().await;

    engine
        .on_button("comment:begin", &bob(), BOB_CHAT, Some(MessageId(901)))
        .await
        .unwrap();

    assert!(engine.sender().saw_text("Nothing is open"));
    assert_eq!(engine.session_snapshot(2).await.state, SessionState::Idle);
}

#[tokio::test]
async fn menu_resets_state_but_keeps_current_item() {
    let engine = test_engine().await;
    upload(&engine, &alice(), ALICE_CHAT, "file-a", None).await;

    engine
        .on_button("view", &bob(), BOB_CHAT, Some(MessageId(901)))
        .await
        .unwrap();
    let item_id = engine.session_snapshot(2).await.current_item;
    assert!(item_id.is_some());

    engine
        .on_button("upload", &bob(), BOB_CHAT, Some(MessageId(902)))
        .await
        .unwrap();
    engine
        .on_button("menu", &bob(), BOB_CHAT, Some(MessageId(903)))
        .await
        .unwrap();

    let session = engine.session_snapshot(2).await;
    assert_eq!(session.state, SessionState::Idle);
    assert_eq!(session.current_item, item_id);
}

#[tokio::test]
async fn start_registers_once_and_shows_menu() {
    let engine = test_engine().await;

    engine
        .on_command(CommandKind::Start, &alice(), ALICE_CHAT)
        .await
        .unwrap();
    engine
        .on_command(CommandKind::Start, &alice(), ALICE_CHAT)
        .await
        .unwrap();

    assert_eq!(user::count_users(engine.database().pool()).await.unwrap(), 1);
    assert!(engine.sender().saw_text("Hi, alice!"));

    // Main menu carries the four entry tags
    let log = engine.sender().log();
    let Some(Sent::Text { tags, .. }) = log.first() else {
        panic!("expected a text message first, got {:?}", log.first());
    };
    assert_eq!(tags, &["upload", "view", "profile", "stats"]);
}

#[tokio::test]
async fn unknown_button_is_ignored() {
    let engine = test_engine().await;

    engine
        .on_button("definitely-not-a-tag", &alice(), ALICE_CHAT, Some(MessageId(901)))
        .await
        .unwrap();

    assert!(engine.sender().log().is_empty());
}

#[tokio::test]
async fn reaction_without_current_item_is_refused() {
    let engine = test_engine().await;

    engine
        .on_button("react:approve", &alice(), ALICE_CHAT, Some(MessageId(901)))
        .await
        .unwrap();

    assert!(engine.sender().saw_text("Nothing is open"));
    assert!(
        reaction::find_reaction(engine.database().pool(), 1, 1)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn auto_advance_can_be_disabled() {
    let db = Database::connect_with_pool_size("sqlite::memory:", 1)
        .await
        .unwrap();
    db.migrate().await.unwrap();
    let engine = FeedEngine::with_config(
        db,
        RecordingSender::default(),
        EngineConfig { auto_advance: false },
    );

    upload(&engine, &alice(), ALICE_CHAT, "file-a", None).await;
    upload(&engine, &alice(), ALICE_CHAT, "file-b", None).await;

    engine
        .on_button("view", &bob(), BOB_CHAT, Some(MessageId(901)))
        .await
        .unwrap();
    let cards_before = engine.sender().media_refs().len();

    engine
        .on_button("react:approve", &bob(), BOB_CHAT, Some(MessageId(902)))
        .await
        .unwrap();

    // Confirmation only; no next card until the user asks
    assert!(engine.sender().saw_text("Like counted!"));
    assert_eq!(engine.sender().media_refs().len(), cards_before);
}

#[tokio::test]
async fn reacting_approve_and_disapprove_from_two_viewers() {
    let engine = test_engine().await;
    upload(&engine, &alice(), ALICE_CHAT, "file-a", None).await;
    let carol = UserRef::named(3, "carol");

    engine
        .on_button("view", &bob(), BOB_CHAT, Some(MessageId(901)))
        .await
        .unwrap();
    engine
        .on_button("react:approve", &bob(), BOB_CHAT, Some(MessageId(902)))
        .await
        .unwrap();

    engine
        .on_button("view", &carol, ChatId(3), Some(MessageId(903)))
        .await
        .unwrap();
    engine
        .on_button("react:disapprove", &carol, ChatId(3), Some(MessageId(904)))
        .await
        .unwrap();

    let item_id = engine.session_snapshot(3).await.current_item.unwrap();
    let stored = item::get_item(engine.database().pool(), item_id)
        .await
        .unwrap();
    assert_eq!((stored.likes, stored.dislikes), (1, 1));

    // Counters agree with the ledger rows
    assert_eq!(
        reaction::count_for_item(engine.database().pool(), item_id, ReactionKind::Approve)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        reaction::count_for_item(engine.database().pool(), item_id, ReactionKind::Disapprove)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn stats_card_counts_members_and_uploads() {
    let engine = test_engine().await;
    upload(&engine, &alice(), ALICE_CHAT, "file-a", None).await;
    engine
        .on_command(CommandKind::Start, &bob(), BOB_CHAT)
        .await
        .unwrap();

    engine
        .on_button("stats", &bob(), BOB_CHAT, Some(MessageId(901)))
        .await
        .unwrap();

    assert!(engine.sender().saw_text("Members: 2"));
    assert!(engine.sender().saw_text("Uploads: 1"));
}

#[tokio::test]
async fn stale_feed_card_is_deleted_on_advance() {
    let engine = test_engine().await;
    upload(&engine, &alice(), ALICE_CHAT, "file-a", None).await;
    upload(&engine, &alice(), ALICE_CHAT, "file-b", None).await;

    engine
        .on_button("view", &bob(), BOB_CHAT, Some(MessageId(901)))
        .await
        .unwrap();
    engine
        .on_button("react:approve", &bob(), BOB_CHAT, Some(MessageId(902)))
        .await
        .unwrap();

    // Auto-advance rendered a second card and discarded the first
    assert_eq!(engine.sender().media_refs().len(), 2);
    assert!(engine
        .sender()
        .log()
        .iter()
        .any(|entry| matches!(entry, Sent::Delete { .. })));
}
