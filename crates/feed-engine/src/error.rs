//! Error types for engine operations.

use bot_core::TransportError;
use database::DatabaseError;
use thiserror::Error;

/// Errors that can escape an event handler.
///
/// Expected store outcomes (`NotFound`, `AlreadyExists`) are handled inside
/// the flows and rendered as user-visible notices; what propagates here is
/// the unexpected: a failing store or a failing transport. Conversation
/// state is never advanced before the write that justifies it, so a failed
/// event can safely be retried by the user.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The durable store failed mid-operation.
    #[error("store error: {0}")]
    Store(#[from] DatabaseError),

    /// The transport failed to deliver a reply.
    #[error("transport error: {0}")]
    Send(#[from] TransportError),
}
