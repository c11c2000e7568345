//! Feed continuation: pick and render the next unseen item.

use bot_core::{ChatId, ChatSender, MessageId};
use database::item;
use tracing::debug;

use crate::engine::FeedEngine;
use crate::error::EngineError;
use crate::replies;
use crate::session::Session;

impl<S: ChatSender> FeedEngine<S> {
    /// Show the viewer their next unseen item, or the exhaustion notice.
    ///
    /// An item is unseen while the viewer owns no reaction on it; merely
    /// having been shown does not consume it, so an undecided item may
    /// reappear. On success the new card replaces the previous one and
    /// becomes the session's current item.
    pub(crate) async fn show_next(
        &self,
        session: &mut Session,
        viewer_id: i64,
        chat: ChatId,
        replace: Option<MessageId>,
    ) -> Result<(), EngineError> {
        match item::random_unseen(self.db.pool(), viewer_id).await? {
            Some(item) => {
                let card = self
                    .sender
                    .send_media(
                        chat,
                        &item.payload_ref,
                        &replies::feed_caption(&item),
                        Some(&replies::feed_menu()),
                    )
                    .await?;

                if let Some(old) = session.last_card.take() {
                    self.discard(chat, old).await;
                }
                if let Some(menu_message) = replace {
                    self.discard(chat, menu_message).await;
                }

                debug!("Showing item {} to viewer {}", item.id, viewer_id);
                session.current_item = Some(item.id);
                session.last_card = Some(card);
            }
            None => {
                debug!("Feed exhausted for viewer {}", viewer_id);
                self.respond(
                    chat,
                    replace,
                    replies::FEED_EXHAUSTED,
                    Some(&replies::back_menu()),
                )
                .await?;
            }
        }

        Ok(())
    }
}
