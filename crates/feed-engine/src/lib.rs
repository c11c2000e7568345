//! Content feed engine and conversation state machine for Palette.
//!
//! This crate is the core of the bot: it classifies inbound events through
//! a per-user conversation state machine, drives the unseen-content feed,
//! records at-most-once reactions, accepts comments, and paginates a user's
//! own uploads. It talks to persistence through the `database` crate and to
//! the chat platform through the `bot_core::ChatSender` trait.
//!
//! # Example
//!
//! ```no_run
//! use bot_core::{ChatId, CommandKind, InboundEvent, LoggingSender, UserRef};
//! use database::Database;
//! use feed_engine::FeedEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:palette.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let engine = FeedEngine::new(db, LoggingSender);
//!     let event = InboundEvent::command(UserRef::named(1, "alice"), ChatId(1), CommandKind::Start);
//!     engine.handle(&event).await?;
//!
//!     Ok(())
//! }
//! ```

mod buttons;
mod config;
mod engine;
mod error;
mod feed;
mod profile;
pub mod replies;
mod session;

pub use buttons::ButtonTag;
pub use config::EngineConfig;
pub use engine::FeedEngine;
pub use error::EngineError;
pub use session::{Session, SessionState, SessionStore};
