use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use webrtc::track::track_local::TrackLocal;

use tether_client::{EngineError, IceGate, SessionEngine};
use tether_core::{SdpKind, SessionDescription};

/// Engine calls in invocation order, for ordering assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOp {
    AddTrack,
    CreateOffer,
    CreateAnswer,
    SetLocal(SdpKind),
    SetRemote(SdpKind),
    Close,
}

/// Which engine call should be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    CreateOffer,
    CreateAnswer,
    SetLocal,
    SetRemote,
}

/// Scripted [`SessionEngine`] that records every call.
///
/// By default gathering "completes" as soon as the local description is set,
/// delivering the description with a marker candidate line appended. Gating
/// tests use [`manual_gathering`](Self::manual_gathering) and fire the armed
/// gate themselves.
#[derive(Clone)]
pub struct MockEngine {
    ops: Arc<Mutex<Vec<EngineOp>>>,
    gate: Arc<Mutex<Option<IceGate>>>,
    fail: Option<FailPoint>,
    auto_gathering: bool,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            ops: Arc::new(Mutex::new(Vec::new())),
            gate: Arc::new(Mutex::new(None)),
            fail: None,
            auto_gathering: true,
        }
    }

    pub fn manual_gathering() -> Self {
        Self {
            auto_gathering: false,
            ..Self::new()
        }
    }

    pub fn failing(point: FailPoint) -> Self {
        Self {
            fail: Some(point),
            ..Self::new()
        }
    }

    pub async fn ops(&self) -> Vec<EngineOp> {
        self.ops.lock().await.clone()
    }

    pub async fn gate_armed(&self) -> bool {
        self.gate.lock().await.is_some()
    }

    /// Fire the armed gate. Returns false if no gate was registered yet.
    pub async fn fire_gathering(&self, desc: SessionDescription) -> bool {
        match self.gate.lock().await.as_ref() {
            Some(gate) => {
                gate.complete(desc);
                true
            }
            None => false,
        }
    }

    fn fails_at(&self, point: FailPoint) -> Result<(), EngineError> {
        if self.fail == Some(point) {
            Err(EngineError::new(format!("mock engine refused {point:?}")))
        } else {
            Ok(())
        }
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The description as the engine would finalize it after gathering: the same
/// payload with candidates baked in.
pub fn finalized(desc: &SessionDescription) -> SessionDescription {
    SessionDescription::new(
        desc.kind,
        format!("{}\r\na=candidate:1 1 udp 2130706431 192.0.2.1 5000 typ host", desc.sdp),
    )
}

#[async_trait]
impl SessionEngine for MockEngine {
    async fn add_outgoing_track(
        &self,
        _track: Arc<dyn TrackLocal + Send + Sync>,
    ) -> Result<(), EngineError> {
        self.ops.lock().await.push(EngineOp::AddTrack);
        Ok(())
    }

    async fn create_offer(&self) -> Result<SessionDescription, EngineError> {
        self.ops.lock().await.push(EngineOp::CreateOffer);
        self.fails_at(FailPoint::CreateOffer)?;
        Ok(SessionDescription::new(SdpKind::Offer, "v=0 mock-offer"))
    }

    async fn create_answer(&self) -> Result<SessionDescription, EngineError> {
        self.ops.lock().await.push(EngineOp::CreateAnswer);
        self.fails_at(FailPoint::CreateAnswer)?;
        Ok(SessionDescription::new(SdpKind::Answer, "v=0 mock-answer"))
    }

    async fn set_local_description(&self, desc: SessionDescription) -> Result<(), EngineError> {
        self.ops.lock().await.push(EngineOp::SetLocal(desc.kind));
        self.fails_at(FailPoint::SetLocal)?;

        if self.auto_gathering {
            if let Some(gate) = self.gate.lock().await.as_ref() {
                gate.complete(finalized(&desc));
            }
        }
        Ok(())
    }

    async fn set_remote_description(&self, desc: SessionDescription) -> Result<(), EngineError> {
        self.ops.lock().await.push(EngineOp::SetRemote(desc.kind));
        self.fails_at(FailPoint::SetRemote)?;
        Ok(())
    }

    async fn watch_gathering(&self, gate: IceGate) {
        *self.gate.lock().await = Some(gate);
    }

    async fn close(&self) -> Result<(), EngineError> {
        self.ops.lock().await.push(EngineOp::Close);
        Ok(())
    }
}
