//! The feed engine: event dispatch over per-user conversation state.

use bot_core::{ChatId, ChatSender, CommandKind, EventKind, InboundEvent, Menu, MessageId, UserRef};
use database::{comment, item, reaction, user, validation, Database, DatabaseError, ReactionKind};
use tracing::{debug, info, warn};

use crate::buttons::ButtonTag;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::replies;
use crate::session::{Session, SessionState, SessionStore};

/// The content feed engine.
///
/// Dispatches inbound events through the per-user conversation state
/// machine onto the content store, and renders results through the
/// transport sender. One instance serves all users; per-user serialization
/// happens inside [`SessionStore`].
pub struct FeedEngine<S: ChatSender> {
    pub(crate) db: Database,
    pub(crate) sender: S,
    pub(crate) sessions: SessionStore,
    pub(crate) config: EngineConfig,
}

impl<S: ChatSender> FeedEngine<S> {
    /// Create an engine with the default configuration.
    pub fn new(db: Database, sender: S) -> Self {
        Self::with_config(db, sender, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(db: Database, sender: S, config: EngineConfig) -> Self {
        Self {
            db,
            sender,
            sessions: SessionStore::new(),
            config,
        }
    }

    /// Get a reference to the database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Get a reference to the sender.
    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Snapshot a user's session, creating it if absent.
    pub async fn session_snapshot(&self, user_id: i64) -> Session {
        self.sessions.session(user_id).await.lock().await.clone()
    }

    /// Route one inbound event to the matching entry point.
    pub async fn handle(&self, event: &InboundEvent) -> Result<(), EngineError> {
        match &event.kind {
            EventKind::Command { kind } => self.on_command(*kind, &event.user, event.chat_id).await,
            EventKind::Button { tag } => {
                self.on_button(tag, &event.user, event.chat_id, event.message_id)
                    .await
            }
            EventKind::Text { text } => self.on_text(text, &event.user, event.chat_id).await,
            EventKind::Media {
                payload_ref,
                caption,
            } => {
                self.on_media(payload_ref, caption.as_deref(), &event.user, event.chat_id)
                    .await
            }
        }
    }

    /// Handle a parsed command.
    pub async fn on_command(
        &self,
        kind: CommandKind,
        user: &UserRef,
        chat: ChatId,
    ) -> Result<(), EngineError> {
        let result = self.dispatch_command(kind, user, chat).await;
        self.notify_on_store_failure(chat, result).await
    }

    /// Handle an inline button press.
    pub async fn on_button(
        &self,
        tag: &str,
        user: &UserRef,
        chat: ChatId,
        message: Option<MessageId>,
    ) -> Result<(), EngineError> {
        let result = self.dispatch_button(tag, user, chat, message).await;
        self.notify_on_store_failure(chat, result).await
    }

    /// Handle a free-text message.
    pub async fn on_text(
        &self,
        text: &str,
        user: &UserRef,
        chat: ChatId,
    ) -> Result<(), EngineError> {
        let result = self.dispatch_text(text, user, chat).await;
        self.notify_on_store_failure(chat, result).await
    }

    /// Handle a media message.
    pub async fn on_media(
        &self,
        payload_ref: &str,
        caption: Option<&str>,
        user: &UserRef,
        chat: ChatId,
    ) -> Result<(), EngineError> {
        let result = self.dispatch_media(payload_ref, caption, user, chat).await;
        self.notify_on_store_failure(chat, result).await
    }

    async fn dispatch_command(
        &self,
        kind: CommandKind,
        user: &UserRef,
        chat: ChatId,
    ) -> Result<(), EngineError> {
        user::register_user(self.db.pool(), user.id, user.username.as_deref()).await?;

        let handle = self.sessions.session(user.id).await;
        let mut session = handle.lock().await;

        match kind {
            CommandKind::Start => {
                // Fresh session: pending intents and pointers are dropped.
                *session = Session::new();
                self.sender
                    .send_text(
                        chat,
                        &replies::welcome_text(user.username.as_deref()),
                        Some(&replies::main_menu()),
                    )
                    .await?;
            }
            CommandKind::Help => {
                self.sender
                    .send_text(chat, replies::HELP_TEXT, Some(&replies::back_menu()))
                    .await?;
            }
        }

        Ok(())
    }

    async fn dispatch_button(
        &self,
        raw_tag: &str,
        user: &UserRef,
        chat: ChatId,
        message: Option<MessageId>,
    ) -> Result<(), EngineError> {
        let Some(tag) = ButtonTag::parse(raw_tag) else {
            debug!("Ignoring unknown button tag: {}", raw_tag);
            return Ok(());
        };

        user::register_user(self.db.pool(), user.id, user.username.as_deref()).await?;

        let handle = self.sessions.session(user.id).await;
        let mut session = handle.lock().await;

        match tag {
            ButtonTag::Upload => {
                self.respond(chat, message, replies::UPLOAD_PROMPT, None)
                    .await?;
                session.state = SessionState::AwaitingUpload;
            }
            ButtonTag::View => {
                self.show_next(&mut session, user.id, chat, message).await?;
            }
            ButtonTag::Profile => {
                // Entering the profile view reloads the list from index 0.
                session.profile_index = 0;
                self.show_profile(&mut session, user.id, chat, message).await?;
            }
            ButtonTag::ProfileNext => {
                session.profile_index += 1;
                self.show_profile(&mut session, user.id, chat, message).await?;
            }
            ButtonTag::ProfilePrev => {
                session.profile_index = session.profile_index.saturating_sub(1);
                self.show_profile(&mut session, user.id, chat, message).await?;
            }
            ButtonTag::ReactApprove => {
                self.react(&mut session, user.id, chat, message, ReactionKind::Approve)
                    .await?;
            }
            ButtonTag::ReactDisapprove => {
                self.react(&mut session, user.id, chat, message, ReactionKind::Disapprove)
                    .await?;
            }
            ButtonTag::CommentBegin => {
                let Some(item_id) = session.current_item else {
                    return self
                        .respond(
                            chat,
                            message,
                            replies::NO_CURRENT_ITEM,
                            Some(&replies::back_menu()),
                        )
                        .await;
                };
                self.respond(chat, message, replies::COMMENT_PROMPT, None)
                    .await?;
                session.state = SessionState::AwaitingComment { item_id };
            }
            ButtonTag::Stats => {
                let users = user::count_users(self.db.pool()).await?;
                let items = item::count_items(self.db.pool()).await?;
                self.respond(
                    chat,
                    message,
                    &replies::stats_text(users, items),
                    Some(&replies::back_menu()),
                )
                .await?;
            }
            ButtonTag::Menu => {
                session.state = SessionState::Idle;
                self.respond(
                    chat,
                    message,
                    &replies::welcome_text(user.username.as_deref()),
                    Some(&replies::main_menu()),
                )
                .await?;
            }
        }

        Ok(())
    }

    async fn dispatch_text(
        &self,
        text: &str,
        user: &UserRef,
        chat: ChatId,
    ) -> Result<(), EngineError> {
        user::register_user(self.db.pool(), user.id, user.username.as_deref()).await?;

        let handle = self.sessions.session(user.id).await;
        let mut session = handle.lock().await;

        match session.state {
            SessionState::AwaitingUpload => {
                // Recoverable: the upload intent stands.
                self.send_notice(chat, replies::UPLOAD_REJECTION).await
            }
            SessionState::AwaitingComment { item_id } => {
                if let Err(err) = validation::validate_comment(text) {
                    debug!("Rejecting comment from {}: {}", user.id, err);
                    return self
                        .send_notice(chat, &format!("{}. Try again.", err))
                        .await;
                }

                match comment::add_comment(self.db.pool(), user.id, item_id, text.trim()).await {
                    Ok(comment_id) => {
                        session.state = SessionState::Idle;
                        info!(
                            "User {} commented on item {} (comment {})",
                            user.id, item_id, comment_id
                        );
                        self.send_notice(chat, replies::COMMENT_CONFIRMATION).await?;
                        // Convenience continuation: straight back into the feed.
                        self.show_next(&mut session, user.id, chat, None).await
                    }
                    Err(DatabaseError::NotFound { .. }) => {
                        // The item vanished; the intent cannot complete.
                        session.state = SessionState::Idle;
                        self.send_notice(chat, replies::ITEM_GONE).await
                    }
                    Err(err) => Err(err.into()),
                }
            }
            SessionState::Idle => {
                debug!("Ignoring free text from {} outside a pending intent", user.id);
                Ok(())
            }
        }
    }

    async fn dispatch_media(
        &self,
        payload_ref: &str,
        caption: Option<&str>,
        user: &UserRef,
        chat: ChatId,
    ) -> Result<(), EngineError> {
        user::register_user(self.db.pool(), user.id, user.username.as_deref()).await?;

        let handle = self.sessions.session(user.id).await;
        let mut session = handle.lock().await;

        match session.state {
            SessionState::AwaitingUpload => {
                if let Some(text) = caption {
                    if let Err(err) = validation::validate_caption(text) {
                        debug!("Rejecting caption from {}: {}", user.id, err);
                        return self
                            .send_notice(chat, &format!("{}. Resend the image.", err))
                            .await;
                    }
                }
                let caption = caption.map(str::trim).filter(|text| !text.is_empty());

                let item_id =
                    item::create_item(self.db.pool(), user.id, payload_ref, caption).await?;
                session.state = SessionState::Idle;
                info!("User {} uploaded item {}", user.id, item_id);

                self.sender
                    .send_text(
                        chat,
                        &replies::upload_confirmation(item_id),
                        Some(&replies::after_upload_menu()),
                    )
                    .await?;
                Ok(())
            }
            SessionState::AwaitingComment { .. } => {
                // Recoverable: the comment intent stands.
                self.send_notice(chat, replies::COMMENT_REJECTION).await
            }
            SessionState::Idle => {
                debug!("Ignoring media from {} outside a pending intent", user.id);
                Ok(())
            }
        }
    }

    /// Record a reaction on the item the user is looking at.
    async fn react(
        &self,
        session: &mut Session,
        user_id: i64,
        chat: ChatId,
        message: Option<MessageId>,
        kind: ReactionKind,
    ) -> Result<(), EngineError> {
        let Some(item_id) = session.current_item else {
            return self
                .respond(
                    chat,
                    message,
                    replies::NO_CURRENT_ITEM,
                    Some(&replies::back_menu()),
                )
                .await;
        };

        match reaction::record_reaction(self.db.pool(), user_id, item_id, kind).await {
            Ok(()) => {
                info!(
                    "User {} reacted {} on item {}",
                    user_id,
                    kind.as_str(),
                    item_id
                );
                self.send_notice(
                    chat,
                    replies::reaction_recorded(kind == ReactionKind::Approve),
                )
                .await?;

                if self.config.auto_advance {
                    self.show_next(session, user_id, chat, None).await?;
                }
                Ok(())
            }
            Err(DatabaseError::AlreadyExists { .. }) => {
                self.send_notice(chat, replies::ALREADY_REACTED).await
            }
            Err(DatabaseError::NotFound { .. }) => {
                self.send_notice(chat, replies::ITEM_GONE).await
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Edit the triggering message when we have one, otherwise send fresh.
    ///
    /// Edits can fail once a message is too old; fall back to a new message
    /// so the user always gets a reply.
    pub(crate) async fn respond(
        &self,
        chat: ChatId,
        message: Option<MessageId>,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<(), EngineError> {
        if let Some(id) = message {
            match self.sender.edit_text(chat, id, text, menu).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    warn!("Edit of message {} failed, sending fresh: {}", id.0, err);
                }
            }
        }
        self.sender.send_text(chat, text, menu).await?;
        Ok(())
    }

    /// Send a plain notice with no menu.
    pub(crate) async fn send_notice(&self, chat: ChatId, text: &str) -> Result<(), EngineError> {
        self.sender.send_text(chat, text, None).await?;
        Ok(())
    }

    /// Delete a superseded message, best-effort.
    pub(crate) async fn discard(&self, chat: ChatId, message: MessageId) {
        if let Err(err) = self.sender.delete_message(chat, message).await {
            debug!("Failed to delete message {}: {}", message.0, err);
        }
    }

    /// On a store failure, tell the user to retry before propagating.
    ///
    /// State was not advanced (writes precede transitions), so retrying the
    /// same action is safe.
    async fn notify_on_store_failure(
        &self,
        chat: ChatId,
        result: Result<(), EngineError>,
    ) -> Result<(), EngineError> {
        if let Err(EngineError::Store(ref err)) = result {
            warn!("Store failure while handling event: {}", err);
            if let Err(send_err) = self.sender.send_text(chat, replies::RETRY_TEXT, None).await {
                warn!("Failed to deliver retry notice: {}", send_err);
            }
        }
        result
    }
}
