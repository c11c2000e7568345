//! Event processor that pumps transport events through the feed engine.

use std::sync::Arc;

use bot_core::{ChatSender, InboundEvent};
use feed_engine::FeedEngine;
use futures::{Stream, StreamExt};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Errors that can occur while processing the event stream.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The transport's event stream ended unexpectedly.
    #[error("event stream ended")]
    StreamEnded,
}

/// Pumps inbound events through a shared [`FeedEngine`].
///
/// Each event runs to completion in its own task, so no user's event blocks
/// another's. Ordering between two events for the same user is enforced by
/// the engine's per-user session lock, not here.
pub struct EventProcessor<S: ChatSender + 'static> {
    engine: Arc<FeedEngine<S>>,
}

impl<S: ChatSender + 'static> EventProcessor<S> {
    /// Create a processor owning the engine.
    pub fn new(engine: FeedEngine<S>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Create a processor around an already-shared engine.
    pub fn from_shared(engine: Arc<FeedEngine<S>>) -> Self {
        Self { engine }
    }

    /// Get the shared engine.
    pub fn engine(&self) -> &Arc<FeedEngine<S>> {
        &self.engine
    }

    fn spawn_handler(&self, tasks: &mut JoinSet<()>, event: InboundEvent) {
        let engine = self.engine.clone();
        tasks.spawn(async move {
            if let Err(err) = engine.handle(&event).await {
                // Log and keep serving; the user already got a retry notice
                // where one applies.
                warn!("Error handling event for user {}: {}", event.user.id, err);
            }
        });
    }

    /// Run the processor until the stream ends.
    ///
    /// In-flight handlers are drained before returning.
    pub async fn run<St>(self, mut stream: St) -> Result<(), ListenerError>
    where
        St: Stream<Item = InboundEvent> + Unpin,
    {
        info!("Starting event processor");

        let mut tasks = JoinSet::new();
        while let Some(event) = stream.next().await {
            // Reap finished handlers without blocking on the slow ones.
            while tasks.try_join_next().is_some() {}
            self.spawn_handler(&mut tasks, event);
        }

        while tasks.join_next().await.is_some() {}
        warn!("Event stream ended");
        Err(ListenerError::StreamEnded)
    }

    /// Run the processor with graceful shutdown support.
    ///
    /// Returns `Ok(())` once the shutdown signal fires and in-flight
    /// handlers have drained; returns `StreamEnded` if the stream closes
    /// first.
    pub async fn run_with_shutdown<St, F>(
        self,
        mut stream: St,
        shutdown_signal: F,
    ) -> Result<(), ListenerError>
    where
        St: Stream<Item = InboundEvent> + Unpin,
        F: std::future::Future<Output = ()> + Send,
    {
        info!("Starting event processor (graceful shutdown enabled)");

        tokio::pin!(shutdown_signal);
        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown_signal => {
                    info!("Shutdown signal received, draining in-flight handlers");
                    while tasks.join_next().await.is_some() {}
                    return Ok(());
                }

                event = stream.next() => match event {
                    Some(event) => {
                        while tasks.try_join_next().is_some() {}
                        self.spawn_handler(&mut tasks, event);
                    }
                    None => {
                        while tasks.join_next().await.is_some() {}
                        warn!("Event stream ended");
                        return Err(ListenerError::StreamEnded);
                    }
                },
            }
        }
    }
}
