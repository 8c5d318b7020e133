use std::sync::Arc;
use tracing::{debug, error, info};

use crate::media::MediaEndpoint;
use crate::session::{NegotiationError, Role, SessionConfig, SessionPhase};
use crate::signaling::{HttpSignalingClient, SignalingTransport};
use crate::transport::{GateError, IceGate, LinkConfig, PeerLink, SessionEngine};
use tether_core::{CodecError, SdpKind, SessionDescription, SessionId, Side, SignalingEnvelope};

/// Offer/answer negotiation for a single peer connection.
///
/// Owns all mutable negotiation state for one connection attempt. The peer on
/// the other end of the signaling exchange does not support trickle ICE, so
/// the local description is held back until candidate gathering has finished;
/// that ordering is the one invariant everything here is built around.
///
/// The session is one-shot: the only exits from a started negotiation are
/// `Connected` and `Failed`, and a failed session is discarded rather than
/// retried.
pub struct NegotiationSession {
    id: SessionId,
    engine: Arc<dyn SessionEngine>,
    transport: Arc<dyn SignalingTransport>,
    media: Arc<dyn MediaEndpoint>,
    config: SessionConfig,
    phase: SessionPhase,
    role: Option<Role>,
    envelope_sent: bool,
}

impl NegotiationSession {
    pub fn new(
        engine: Arc<dyn SessionEngine>,
        transport: Arc<dyn SignalingTransport>,
        media: Arc<dyn MediaEndpoint>,
        config: SessionConfig,
    ) -> Self {
        Self {
            id: SessionId::new(),
            engine,
            transport,
            media,
            config,
            phase: SessionPhase::Idle,
            role: None,
            envelope_sent: false,
        }
    }

    /// Build a session over a fresh [`PeerLink`] and HTTP signaling client.
    pub async fn connect(
        config: SessionConfig,
        media: Arc<dyn MediaEndpoint>,
    ) -> Result<Self, NegotiationError> {
        let id = SessionId::new();
        let link_config = LinkConfig {
            ice_servers: config.ice_servers.clone(),
        };

        let link = PeerLink::new(id.clone(), link_config, Arc::clone(&media))
            .await
            .map_err(|err| NegotiationError::Setup {
                message: err.to_string(),
            })?;
        let transport = HttpSignalingClient::new(config.signaling_url.clone());

        let mut session = Self::new(Arc::new(link), Arc::new(transport), media, config);
        session.id = id;
        Ok(session)
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Run the full initiator exchange: attach the outgoing track, create the
    /// offer, wait out ICE gathering, post the finalized offer and apply the
    /// reply.
    pub async fn start_as_initiator(&mut self) -> Result<(), NegotiationError> {
        self.expect_phase(SessionPhase::Idle, "start_as_initiator")?;
        self.role = Some(Role::Initiator);
        info!("Session {} starting as initiator", self.id);

        self.attach_outgoing_track().await?;

        self.phase = SessionPhase::CreatingOffer;
        let offer = match self.engine.create_offer().await {
            Ok(offer) => offer,
            Err(err) => {
                return Err(self
                    .fail(NegotiationError::EngineCreation {
                        kind: SdpKind::Offer,
                        message: err.to_string(),
                    })
                    .await);
            }
        };

        self.on_local_description_ready(offer).await
    }

    /// Responder entry: the remote initiated and its offer arrived out of
    /// band. Produces and applies an answer locally; the answer is never sent
    /// back through signaling in this one-shot exchange.
    pub async fn accept_remote_offer(
        &mut self,
        envelope: &SignalingEnvelope,
    ) -> Result<(), NegotiationError> {
        self.expect_phase(SessionPhase::Idle, "accept_remote_offer")?;
        self.role = Some(Role::Responder);
        info!("Session {} acting as responder to a remote offer", self.id);

        self.attach_outgoing_track().await?;

        self.phase = SessionPhase::RemoteOfferReceived;
        self.on_signaling_reply(envelope).await
    }

    /// Close the connection and detach the media pipeline.
    pub async fn close(&mut self) -> Result<(), NegotiationError> {
        info!("Session {} closing", self.id);
        self.media.clear_incoming_track().await;
        self.engine
            .close()
            .await
            .map_err(|err| NegotiationError::Setup {
                message: err.to_string(),
            })
    }

    async fn attach_outgoing_track(&mut self) -> Result<(), NegotiationError> {
        let track = self.media.outgoing_track();
        if let Err(err) = self.engine.add_outgoing_track(track).await {
            return Err(self
                .fail(NegotiationError::Setup {
                    message: format!("failed to attach outgoing track: {err}"),
                })
                .await);
        }
        Ok(())
    }

    /// Apply a freshly created offer or answer locally and hold until ICE
    /// gathering finishes. The gate is armed before the description is set so
    /// a completion that fires immediately cannot be missed.
    async fn on_local_description_ready(
        &mut self,
        desc: SessionDescription,
    ) -> Result<(), NegotiationError> {
        let kind = desc.kind;
        let (gate, gate_rx) = IceGate::channel();
        self.engine.watch_gathering(gate).await;

        if let Err(err) = self.engine.set_local_description(desc).await {
            return Err(self
                .fail(NegotiationError::DescriptionApply {
                    side: Side::Local,
                    kind,
                    message: err.to_string(),
                })
                .await);
        }

        self.phase = SessionPhase::GatheringIce;
        debug!(
            "Session {}: local {} set, waiting for ice gathering",
            self.id, kind
        );

        let final_desc = match gate_rx.wait(self.config.gathering_timeout).await {
            Ok(desc) => desc,
            Err(GateError::Timeout { waited }) => {
                return Err(self
                    .fail(NegotiationError::GatheringTimeout { waited })
                    .await);
            }
            Err(GateError::Abandoned) => {
                return Err(self.fail(NegotiationError::GateClosed).await);
            }
        };

        self.on_ice_gathering_complete(final_desc).await
    }

    /// Gathering finished; the description now carries every candidate. Only
    /// the initiator's first description crosses the wire — an answer
    /// produced later in the exchange was already delivered to the engine and
    /// the remote needs nothing more.
    async fn on_ice_gathering_complete(
        &mut self,
        final_desc: SessionDescription,
    ) -> Result<(), NegotiationError> {
        self.expect_phase(SessionPhase::GatheringIce, "on_ice_gathering_complete")?;

        match self.role {
            Some(Role::Initiator) if !self.envelope_sent => {
                self.envelope_sent = true;
                let tag = self.media.negotiation_tag();
                let envelope = SignalingEnvelope::from_description(&final_desc, tag.as_tag());

                self.phase = SessionPhase::AwaitingRemoteAnswer;
                info!(
                    "Session {}: sending {} with transform '{}'",
                    self.id, envelope.kind, tag
                );

                let reply = match self.transport.send(&envelope).await {
                    Ok(reply) => reply,
                    Err(err) => return Err(self.fail(err.into()).await),
                };

                self.on_signaling_reply(&reply).await
            }
            _ => {
                self.phase = SessionPhase::Connected;
                info!("Session {} connected, answer stays local", self.id);
                Ok(())
            }
        }
    }

    /// Apply the peer's description. An answer completes the exchange; an
    /// offer flips this session into producing an answer.
    async fn on_signaling_reply(
        &mut self,
        envelope: &SignalingEnvelope,
    ) -> Result<(), NegotiationError> {
        let desc = match self.classify(envelope) {
            Ok(desc) => desc,
            Err(err) => return Err(self.fail(err.into()).await),
        };

        let kind = desc.kind;
        if let Err(err) = self.engine.set_remote_description(desc).await {
            return Err(self
                .fail(NegotiationError::DescriptionApply {
                    side: Side::Remote,
                    kind,
                    message: err.to_string(),
                })
                .await);
        }
        debug!("Session {}: remote {} applied", self.id, kind);

        match kind {
            SdpKind::Offer => {
                self.phase = SessionPhase::CreatingAnswer;
                let answer = match self.engine.create_answer().await {
                    Ok(answer) => answer,
                    Err(err) => {
                        return Err(self
                            .fail(NegotiationError::EngineCreation {
                                kind: SdpKind::Answer,
                                message: err.to_string(),
                            })
                            .await);
                    }
                };
                Box::pin(self.on_local_description_ready(answer)).await
            }
            SdpKind::Answer => {
                self.phase = SessionPhase::Connected;
                info!("Session {} connected", self.id);
                Ok(())
            }
        }
    }

    fn classify(&self, envelope: &SignalingEnvelope) -> Result<SessionDescription, CodecError> {
        if self.config.reject_unknown_kinds {
            envelope.description_strict()
        } else {
            Ok(envelope.description())
        }
    }

    fn expect_phase(
        &self,
        expected: SessionPhase,
        operation: &'static str,
    ) -> Result<(), NegotiationError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(NegotiationError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    /// Record the terminal failure and leave the media pipeline detached.
    async fn fail(&mut self, err: NegotiationError) -> NegotiationError {
        error!(
            "Session {} failed in phase {:?}: {}",
            self.id, self.phase, err
        );
        self.phase = SessionPhase::Failed;
        self.media.clear_incoming_track().await;
        err
    }
}
