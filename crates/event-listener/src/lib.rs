//! Event stream processing for the Palette bot.
//!
//! Connects a transport's inbound event stream to the feed engine: one
//! handler task per event, graceful shutdown, and per-user ordering left to
//! the engine's session locks.

mod processor;

pub use processor::{EventProcessor, ListenerError};
