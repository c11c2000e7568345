//! Shared event and transport types for the Palette bot.
//!
//! This crate provides the interface between the chat transport and the
//! feed engine. It defines:
//!
//! - [`InboundEvent`] / [`EventKind`] - The inbound event model delivered
//!   by a transport adapter
//! - [`ChatSender`] - The trait a transport implements to render replies
//! - [`Menu`] / [`MenuButton`] - Inline action menus attached to messages
//! - [`TransportError`] - Error type for transport operations
//!
//! # Example
//!
//! ```rust
//! use bot_core::{ChatSender, ChatId, Menu, MenuButton, MessageId, TransportError};
//! use async_trait::async_trait;
//!
//! struct MySender;
//!
//! #[async_trait]
//! impl ChatSender for MySender {
//!     async fn send_text(
//!         &self,
//!         _chat: ChatId,
//!         _text: &str,
//!         _menu: Option<&Menu>,
//!     ) -> Result<MessageId, TransportError> {
//!         Ok(MessageId(1))
//!     }
//!
//!     async fn send_media(
//!         &self,
//!         _chat: ChatId,
//!         _payload_ref: &str,
//!         _text: &str,
//!         _menu: Option<&Menu>,
//!     ) -> Result<MessageId, TransportError> {
//!         Ok(MessageId(2))
//!     }
//!
//!     async fn edit_text(
//!         &self,
//!         _chat: ChatId,
//!         _message: MessageId,
//!         _text: &str,
//!         _menu: Option<&Menu>,
//!     ) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//!
//!     async fn delete_message(
//!         &self,
//!         _chat: ChatId,
//!         _message: MessageId,
//!     ) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//! }
//! ```

mod error;
mod event;
mod sender;

pub use error::TransportError;
pub use event::{ChatId, CommandKind, EventKind, InboundEvent, MessageId, UserRef};
pub use sender::{ChatSender, LoggingSender, Menu, MenuButton, NoOpSender};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
