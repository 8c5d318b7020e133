use async_trait::async_trait;
use thiserror::Error;

use tether_core::SignalingEnvelope;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("signaling request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("signaling endpoint returned {status}")]
    Status { status: reqwest::StatusCode },
    #[error("failed to decode signaling reply: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Request/response channel carrying session descriptions to the peer.
///
/// One send yields exactly one reply or one error. Negotiation is a one-shot
/// handshake, so there is no retry here; restarting belongs to whoever owns
/// the session.
#[async_trait]
pub trait SignalingTransport: Send + Sync {
    async fn send(&self, envelope: &SignalingEnvelope) -> Result<SignalingEnvelope, TransportError>;
}
