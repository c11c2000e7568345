//! Error types for transport operations.

use thiserror::Error;

/// Errors that can occur when talking to the chat transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Sending a message failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Editing a previously sent message failed.
    #[error("edit failed: {0}")]
    EditFailed(String),

    /// Deleting a previously sent message failed.
    #[error("delete failed: {0}")]
    DeleteFailed(String),

    /// The transport connection is gone.
    #[error("transport disconnected: {0}")]
    Disconnected(String),
}
