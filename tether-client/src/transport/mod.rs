mod engine;
mod ice_gate;
mod link_config;
mod peer_link;

pub use engine::{EngineError, SessionEngine};
pub use ice_gate::{GateError, IceGate, IceGateReceiver};
pub use link_config::LinkConfig;
pub use peer_link::PeerLink;
