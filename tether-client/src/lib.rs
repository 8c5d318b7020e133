pub mod media;
pub mod session;
pub mod signaling;
pub mod transport;

pub use media::{MediaEndpoint, StaticMediaEndpoint};
pub use session::{NegotiationError, NegotiationSession, Role, SessionConfig, SessionPhase};
pub use signaling::{HttpSignalingClient, SignalingTransport, TransportError};
pub use transport::{
    EngineError, GateError, IceGate, IceGateReceiver, LinkConfig, PeerLink, SessionEngine,
};
