//! Profile browsing: own items with aggregate stats and paging.

use bot_core::{ChatId, ChatSender, MessageId};
use database::item;
use tracing::debug;

use crate::engine::FeedEngine;
use crate::error::EngineError;
use crate::replies;
use crate::session::Session;

/// Clamp a page index into `[0, total - 1]`. No wrap: stepping past either
/// end stays at the boundary.
pub(crate) fn clamp_index(index: usize, total: usize) -> usize {
    index.min(total.saturating_sub(1))
}

impl<S: ChatSender> FeedEngine<S> {
    /// Render the owner's profile page at the session's current index.
    ///
    /// The owned-items list is reloaded on every render; the index is
    /// clamped against the fresh list, so prev/next at a boundary is a
    /// no-op rather than a wrap or an error.
    pub(crate) async fn show_profile(
        &self,
        session: &mut Session,
        owner_id: i64,
        chat: ChatId,
        replace: Option<MessageId>,
    ) -> Result<(), EngineError> {
        let stats = item::owner_stats(self.db.pool(), owner_id).await?;
        let items = item::list_owned(self.db.pool(), owner_id).await?;

        if items.is_empty() {
            session.profile_index = 0;
            return self
                .respond(
                    chat,
                    replace,
                    replies::PROFILE_EMPTY,
                    Some(&replies::profile_menu(0)),
                )
                .await;
        }

        let index = clamp_index(session.profile_index, items.len());
        session.profile_index = index;
        let item = &items[index];

        let card = self
            .sender
            .send_media(
                chat,
                &item.payload_ref,
                &replies::profile_caption(&stats, item, index, items.len()),
                Some(&replies::profile_menu(items.len())),
            )
            .await?;

        if let Some(old) = session.last_card.take() {
            self.discard(chat, old).await;
        }
        if let Some(menu_message) = replace {
            self.discard(chat, menu_message).await;
        }

        debug!(
            "Showing profile page {}/{} to owner {}",
            index + 1,
            items.len(),
            owner_id
        );
        session.current_item = Some(item.id);
        session.last_card = Some(card);

        Ok(())
    }
}
