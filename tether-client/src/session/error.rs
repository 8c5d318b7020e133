use std::time::Duration;
use thiserror::Error;

use crate::session::SessionPhase;
use crate::signaling::TransportError;
use tether_core::{CodecError, SdpKind, Side};

/// Terminal negotiation failures.
///
/// None of these are retried internally; the session moves to
/// [`SessionPhase::Failed`] and the owner decides whether to start over with
/// a fresh session.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("engine failed to create {kind}: {message}")]
    EngineCreation { kind: SdpKind, message: String },

    #[error("failed to apply {side} {kind} description: {message}")]
    DescriptionApply {
        side: Side,
        kind: SdpKind,
        message: String,
    },

    #[error("signaling exchange failed: {0}")]
    Transport(#[from] TransportError),

    #[error("ice gathering did not complete within {waited:?}")]
    GatheringTimeout { waited: Duration },

    #[error("gathering observer was dropped before completing")]
    GateClosed,

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("{operation} is not valid in phase {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: SessionPhase,
    },

    #[error("connection setup failed: {message}")]
    Setup { message: String },
}
