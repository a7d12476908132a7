use std::time::Duration;

use thiserror::Error;

/// Errors from a single request/reply exchange.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Socket creation, connect, send or receive failed.
    #[error("transport error: {0}")]
    Transport(#[from] zmq::Error),
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
    /// The reply frame is not valid JSON.
    #[error("failed to decode reply: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("no reply within {0:?}")]
    Timeout(Duration),
    /// A timed-out exchange left the socket still owing a reply.
    #[error("previous request is still waiting for its reply")]
    ReplyPending,
}
