mod config;
mod error;
mod negotiation;
mod phase;

pub use config::SessionConfig;
pub use error::NegotiationError;
pub use negotiation::NegotiationSession;
pub use phase::{Role, SessionPhase};
