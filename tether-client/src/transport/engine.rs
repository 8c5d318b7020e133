use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use webrtc::track::track_local::TrackLocal;

use crate::transport::IceGate;
use tether_core::SessionDescription;

/// Failure reported by the underlying WebRTC engine.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<webrtc::Error> for EngineError {
    fn from(err: webrtc::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// The engine operations the negotiation machine drives.
///
/// [`PeerLink`](crate::transport::PeerLink) implements this over the webrtc
/// crate; tests substitute a scripted engine.
#[async_trait]
pub trait SessionEngine: Send + Sync {
    /// Attach the outgoing media track before negotiating.
    async fn add_outgoing_track(
        &self,
        track: Arc<dyn TrackLocal + Send + Sync>,
    ) -> Result<(), EngineError>;

    async fn create_offer(&self) -> Result<SessionDescription, EngineError>;

    async fn create_answer(&self) -> Result<SessionDescription, EngineError>;

    async fn set_local_description(&self, desc: SessionDescription) -> Result<(), EngineError>;

    async fn set_remote_description(&self, desc: SessionDescription) -> Result<(), EngineError>;

    /// Register a gate to be fired once candidate gathering for the current
    /// local description has finished. Must be called before the local
    /// description is set so no completion can be missed.
    async fn watch_gathering(&self, gate: IceGate);

    async fn close(&self) -> Result<(), EngineError>;
}
