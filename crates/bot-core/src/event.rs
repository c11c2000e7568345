//! Inbound event types delivered by a chat transport.

use serde::{Deserialize, Serialize};

/// Stable chat/session identifier assigned by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

/// Identifier of a message previously sent into a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub i64);

/// The user an inbound event originates from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Stable platform account id.
    pub id: i64,
    /// Display name, if the platform exposes one.
    #[serde(default)]
    pub username: Option<String>,
}

impl UserRef {
    /// Create a user reference without a display name.
    pub fn new(id: i64) -> Self {
        Self { id, username: None }
    }

    /// Create a user reference with a display name.
    pub fn named(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: Some(username.into()),
        }
    }
}

/// A slash-style command the platform parsed out of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// First contact / return to the main menu.
    Start,
    /// Capability overview.
    Help,
}

/// The payload of an inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A parsed command.
    Command { kind: CommandKind },

    /// An inline button press. The tag is the opaque callback payload the
    /// engine attached to the button when the menu was rendered.
    Button { tag: String },

    /// A free-text message.
    Text { text: String },

    /// A media message carrying an opaque payload handle, never the bytes.
    Media {
        payload_ref: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

/// A single inbound event, tagged with its origin.
///
/// The transport guarantees at-least-once delivery; duplicates for the same
/// user are possible and must be tolerated downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Originating user.
    pub user: UserRef,
    /// Chat the event belongs to (replies go here).
    pub chat_id: ChatId,
    /// The message this event refers to, if any. Present for button
    /// presses, where it identifies the message carrying the menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<MessageId>,
    /// Event payload.
    pub kind: EventKind,
}

impl InboundEvent {
    /// Create a command event.
    pub fn command(user: UserRef, chat_id: ChatId, kind: CommandKind) -> Self {
        Self {
            user,
            chat_id,
            message_id: None,
            kind: EventKind::Command { kind },
        }
    }

    /// Create a button-press event referring to the message the menu was on.
    pub fn button(
        user: UserRef,
        chat_id: ChatId,
        message_id: MessageId,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            user,
            chat_id,
            message_id: Some(message_id),
            kind: EventKind::Button { tag: tag.into() },
        }
    }

    /// Create a free-text event.
    pub fn text(user: UserRef, chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            user,
            chat_id,
            message_id: None,
            kind: EventKind::Text { text: text.into() },
        }
    }

    /// Create a media event.
    pub fn media(
        user: UserRef,
        chat_id: ChatId,
        payload_ref: impl Into<String>,
        caption: Option<String>,
    ) -> Self {
        Self {
            user,
            chat_id,
            message_id: None,
            kind: EventKind::Media {
                payload_ref: payload_ref.into(),
                caption,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_roundtrip() {
        let event = InboundEvent::media(
            UserRef::named(7, "alice"),
            ChatId(7),
            "file-abc",
            Some("sunset".to_string()),
        );

        let json = serde_json::to_string(&event).unwrap();
        let back: InboundEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_button_carries_message_id() {
        let event = InboundEvent::button(UserRef::new(1), ChatId(1), MessageId(42), "view");
        assert_eq!(event.message_id, Some(MessageId(42)));
        assert!(matches!(event.kind, EventKind::Button { ref tag } if tag == "view"));
    }

    #[test]
    fn test_command_tagging() {
        let json = r#"{"user":{"id":1},"chat_id":1,"kind":{"type":"command","kind":"start"}}"#;
        let event: InboundEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(
            event.kind,
            EventKind::Command {
                kind: CommandKind::Start
            }
        ));
        assert_eq!(event.user.username, None);
    }
}
