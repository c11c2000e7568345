//! Outbound sender trait and reference implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::event::{ChatId, MessageId};

/// A single inline button: a human-facing label and the opaque tag the
/// transport echoes back in a button-press event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButton {
    /// Label shown to the user.
    pub label: String,
    /// Callback tag delivered back on press.
    pub tag: String,
}

impl MenuButton {
    /// Create a button.
    pub fn new(label: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: tag.into(),
        }
    }
}

/// An inline action menu attached to a message, laid out in rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Button rows, top to bottom.
    pub rows: Vec<Vec<MenuButton>>,
}

impl Menu {
    /// Create an empty menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row of buttons.
    pub fn row(mut self, buttons: Vec<MenuButton>) -> Self {
        self.rows.push(buttons);
        self
    }

    /// Total number of buttons across all rows.
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Whether the menu has no buttons.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }
}

/// Trait for rendering outbound messages through a chat transport.
///
/// Abstracted to support different platforms (and tests). The engine only
/// ever talks to the transport through this trait.
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Send a text message, optionally with an inline menu.
    async fn send_text(
        &self,
        chat: ChatId,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<MessageId, TransportError>;

    /// Send a media message by payload reference, optionally with an
    /// inline menu. The transport resolves the reference; the engine never
    /// touches the binary.
    async fn send_media(
        &self,
        chat: ChatId,
        payload_ref: &str,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<MessageId, TransportError>;

    /// Replace the text and menu of a previously sent message.
    async fn edit_text(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<(), TransportError>;

    /// Delete a previously sent message.
    async fn delete_message(&self, chat: ChatId, message: MessageId)
        -> Result<(), TransportError>;
}

/// A no-op sender for testing that discards all messages.
#[derive(Debug, Clone, Default)]
pub struct NoOpSender;

#[async_trait]
impl ChatSender for NoOpSender {
    async fn send_text(
        &self,
        _chat: ChatId,
        _text: &str,
        _menu: Option<&Menu>,
    ) -> Result<MessageId, TransportError> {
        Ok(MessageId(0))
    }

    async fn send_media(
        &self,
        _chat: ChatId,
        _payload_ref: &str,
        _text: &str,
        _menu: Option<&Menu>,
    ) -> Result<MessageId, TransportError> {
        Ok(MessageId(0))
    }

    async fn edit_text(
        &self,
        _chat: ChatId,
        _message: MessageId,
        _text: &str,
        _menu: Option<&Menu>,
    ) -> Result<(), TransportError> {
        Ok(())
    }

    async fn delete_message(
        &self,
        _chat: ChatId,
        _message: MessageId,
    ) -> Result<(), TransportError> {
        Ok(())
    }
}

/// A logging sender for debugging that logs all operations.
#[derive(Debug, Clone, Default)]
pub struct LoggingSender;

#[async_trait]
impl ChatSender for LoggingSender {
    async fn send_text(
        &self,
        chat: ChatId,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<MessageId, TransportError> {
        let buttons = menu.map(Menu::len).unwrap_or(0);
        tracing::info!("[chat {}] text ({} buttons): {}", chat.0, buttons, text);
        Ok(MessageId(0))
    }

    async fn send_media(
        &self,
        chat: ChatId,
        payload_ref: &str,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<MessageId, TransportError> {
        let buttons = menu.map(Menu::len).unwrap_or(0);
        tracing::info!(
            "[chat {}] media {} ({} buttons): {}",
            chat.0,
            payload_ref,
            buttons,
            text
        );
        Ok(MessageId(0))
    }

    async fn edit_text(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        _menu: Option<&Menu>,
    ) -> Result<(), TransportError> {
        tracing::info!("[chat {}] edit message {}: {}", chat.0, message.0, text);
        Ok(())
    }

    async fn delete_message(
        &self,
        chat: ChatId,
        message: MessageId,
    ) -> Result<(), TransportError> {
        tracing::info!("[chat {}] delete message {}", chat.0, message.0);
        Ok(())
    }
}
