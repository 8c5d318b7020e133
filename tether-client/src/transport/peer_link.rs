use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::sdp_type::RTCSdpType;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::track::track_local::TrackLocal;

use crate::media::MediaEndpoint;
use crate::transport::link_config::LinkConfig;
use crate::transport::{EngineError, IceGate, SessionEngine};
use tether_core::{SdpKind, SessionDescription, SessionId};

/// WebRTC-backed [`SessionEngine`] owning one peer connection.
///
/// Incoming tracks are forwarded to the media endpoint as they start; the
/// endpoint is detached again once the connection reaches a terminal state.
pub struct PeerLink {
    session_id: SessionId,
    peer_connection: Arc<RTCPeerConnection>,
}

impl PeerLink {
    pub async fn new(
        session_id: SessionId,
        config: LinkConfig,
        media: Arc<dyn MediaEndpoint>,
    ) -> Result<Self, EngineError> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs()?;

        let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let ice_servers = if config.ice_servers.is_empty() {
            vec![]
        } else {
            vec![RTCIceServer {
                urls: config.ice_servers,
                ..Default::default()
            }]
        };

        let rtc_config = RTCConfiguration {
            ice_servers,
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        let state_media = Arc::clone(&media);
        let sid_state = session_id.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |state: RTCPeerConnectionState| {
                let media = Arc::clone(&state_media);
                let sid = sid_state.clone();

                Box::pin(async move {
                    info!("Peer connection state for session {}: {:?}", sid, state);
                    match state {
                        RTCPeerConnectionState::Failed
                        | RTCPeerConnectionState::Disconnected
                        | RTCPeerConnectionState::Closed => {
                            media.clear_incoming_track().await;
                        }
                        _ => {}
                    }
                })
            },
        ));

        let track_media = Arc::clone(&media);
        let sid_track = session_id.clone();
        peer_connection.on_track(Box::new(move |track, _receiver, _transceiver| {
            let media = Arc::clone(&track_media);
            let sid = sid_track.clone();

            Box::pin(async move {
                debug!(
                    "Remote {:?} track '{}' started for session {}",
                    track.kind(),
                    track.id(),
                    sid
                );
                media.deliver_incoming_track(track).await;
            })
        }));

        Ok(Self {
            session_id,
            peer_connection,
        })
    }
}

fn to_engine_description(desc: SessionDescription) -> Result<RTCSessionDescription, EngineError> {
    let result = match desc.kind {
        SdpKind::Offer => RTCSessionDescription::offer(desc.sdp),
        SdpKind::Answer => RTCSessionDescription::answer(desc.sdp),
    };
    result.map_err(EngineError::from)
}

fn from_engine_description(desc: RTCSessionDescription) -> Option<SessionDescription> {
    let kind = match desc.sdp_type {
        RTCSdpType::Offer => SdpKind::Offer,
        RTCSdpType::Answer => SdpKind::Answer,
        _ => return None,
    };
    Some(SessionDescription::new(kind, desc.sdp))
}

#[async_trait]
impl SessionEngine for PeerLink {
    async fn add_outgoing_track(
        &self,
        track: Arc<dyn TrackLocal + Send + Sync>,
    ) -> Result<(), EngineError> {
        self.peer_connection.add_track(track).await?;
        Ok(())
    }

    async fn create_offer(&self) -> Result<SessionDescription, EngineError> {
        let offer = self.peer_connection.create_offer(None).await?;
        from_engine_description(offer)
            .ok_or_else(|| EngineError::new("engine produced an offer without an sdp type"))
    }

    async fn create_answer(&self) -> Result<SessionDescription, EngineError> {
        let answer = self.peer_connection.create_answer(None).await?;
        from_engine_description(answer)
            .ok_or_else(|| EngineError::new("engine produced an answer without an sdp type"))
    }

    async fn set_local_description(&self, desc: SessionDescription) -> Result<(), EngineError> {
        let desc = to_engine_description(desc)?;
        self.peer_connection.set_local_description(desc).await?;
        Ok(())
    }

    async fn set_remote_description(&self, desc: SessionDescription) -> Result<(), EngineError> {
        let desc = to_engine_description(desc)?;
        self.peer_connection.set_remote_description(desc).await?;
        Ok(())
    }

    async fn watch_gathering(&self, gate: IceGate) {
        let mut done = self.peer_connection.gathering_complete_promise().await;
        let peer_connection = Arc::clone(&self.peer_connection);
        let sid = self.session_id.clone();

        tokio::spawn(async move {
            let _ = done.recv().await;

            let Some(desc) = peer_connection.local_description().await else {
                warn!(
                    "Gathering finished without a local description for session {}",
                    sid
                );
                return;
            };
            let Some(desc) = from_engine_description(desc) else {
                warn!("Finalized local description has no usable sdp type");
                return;
            };

            debug!("ICE gathering complete for session {}", sid);
            gate.complete(desc);
        });
    }

    async fn close(&self) -> Result<(), EngineError> {
        self.peer_connection.close().await?;
        Ok(())
    }
}
