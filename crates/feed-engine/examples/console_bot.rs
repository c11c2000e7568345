//! Scripted walkthrough using the LoggingSender.
//!
//! Drives the engine through an upload, a feed view, and a reaction, with
//! every outbound message logged instead of sent to a real chat platform.
//!
//! Run with: cargo run -p feed-engine --example console_bot
//!
//! Configuration via .env file or environment variables:
//!   DATABASE_URL          - SQLite URL (default: in-memory)
//!   PALETTE_AUTO_ADVANCE  - set to 0 to disable auto-advance after a reaction

use bot_core::{ChatId, CommandKind, InboundEvent, LoggingSender, MessageId, UserRef};
use database::Database;
use feed_engine::{EngineConfig, FeedEngine};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    println!("Connecting to {}...", url);

    // An in-memory database needs a single shared connection.
    let db = if url == "sqlite::memory:" {
        Database::connect_with_pool_size(&url, 1).await?
    } else {
        Database::connect(&url).await?
    };
    db.migrate().await?;

    let engine = FeedEngine::with_config(db, LoggingSender, EngineConfig::from_env());

    let alice = UserRef::named(1, "alice");
    let bob = UserRef::named(2, "bob");

    // Alice shares a piece
    engine
        .handle(&InboundEvent::command(alice.clone(), ChatId(1), CommandKind::Start))
        .await?;
    engine
        .handle(&InboundEvent::button(alice.clone(), ChatId(1), MessageId(1), "upload"))
        .await?;
    engine
        .handle(&InboundEvent::media(
            alice.clone(),
            ChatId(1),
            "file-0001",
            Some("quick sketch".to_string()),
        ))
        .await?;

    // Bob finds it in his feed and rates it
    engine
        .handle(&InboundEvent::command(bob.clone(), ChatId(2), CommandKind::Start))
        .await?;
    engine
        .handle(&InboundEvent::button(bob.clone(), ChatId(2), MessageId(2), "view"))
        .await?;
    engine
        .handle(&InboundEvent::button(
            bob.clone(),
            ChatId(2),
            MessageId(3),
            "react:approve",
        ))
        .await?;

    // Alice checks how her piece is doing
    engine
        .handle(&InboundEvent::button(alice.clone(), ChatId(1), MessageId(4), "profile"))
        .await?;

    println!("\nWalkthrough complete.");
    Ok(())
}
