use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use tether_client::{SignalingTransport, TransportError};
use tether_core::SignalingEnvelope;

/// Mock transport that captures every outbound envelope and replies with a
/// canned envelope, or an HTTP-level error when scripted to fail.
#[derive(Clone)]
pub struct MockSignalingTransport {
    sent: Arc<Mutex<Vec<SignalingEnvelope>>>,
    reply: Arc<Option<SignalingEnvelope>>,
}

impl MockSignalingTransport {
    pub fn replying_with(reply: SignalingEnvelope) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Some(reply)),
        }
    }

    /// Reply with `{type: "answer", sdp}`.
    pub fn answering_with(sdp: &str) -> Self {
        Self::replying_with(SignalingEnvelope {
            kind: "answer".to_string(),
            sdp: sdp.to_string(),
            video_transform: String::new(),
        })
    }

    /// Every send fails with a 500.
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(None),
        }
    }

    pub async fn sent(&self) -> Vec<SignalingEnvelope> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl SignalingTransport for MockSignalingTransport {
    async fn send(&self, envelope: &SignalingEnvelope) -> Result<SignalingEnvelope, TransportError> {
        tracing::debug!("[MockTransport] send to /{}", envelope.kind);
        self.sent.lock().await.push(envelope.clone());

        match self.reply.as_ref() {
            Some(reply) => Ok(reply.clone()),
            None => Err(TransportError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            }),
        }
    }
}
