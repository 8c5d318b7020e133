/// Negotiation progress for one connection attempt.
///
/// The initiator path runs `Idle → CreatingOffer → GatheringIce →
/// AwaitingRemoteAnswer → Connected`; the responder path runs `Idle →
/// RemoteOfferReceived → CreatingAnswer → GatheringIce → Connected`.
/// `Failed` is terminal and reachable from any non-terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    CreatingOffer,
    RemoteOfferReceived,
    CreatingAnswer,
    GatheringIce,
    AwaitingRemoteAnswer,
    Connected,
    Failed,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Connected | SessionPhase::Failed)
    }
}

/// Which side started the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Initiator,
    Responder,
}
