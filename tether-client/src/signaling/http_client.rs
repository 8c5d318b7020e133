use async_trait::async_trait;
use tracing::debug;

use crate::signaling::{SignalingTransport, TransportError};
use tether_core::SignalingEnvelope;

/// HTTP signaling client posting envelopes to `{base_url}/{type}`.
///
/// The endpoint convention (`/offer`, `/answer`) is part of the wire contract
/// with the signaling server.
pub struct HttpSignalingClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpSignalingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint_for(&self, envelope: &SignalingEnvelope) -> String {
        format!("{}/{}", self.base_url, envelope.kind)
    }
}

#[async_trait]
impl SignalingTransport for HttpSignalingClient {
    async fn send(&self, envelope: &SignalingEnvelope) -> Result<SignalingEnvelope, TransportError> {
        let url = self.endpoint_for(envelope);
        debug!("POST {} ({} bytes of sdp)", url, envelope.sdp.len());

        let response = self.http.post(&url).json(envelope).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { status });
        }

        let body = response.text().await?;
        let reply = serde_json::from_str(&body)?;
        Ok(reply)
    }
}
