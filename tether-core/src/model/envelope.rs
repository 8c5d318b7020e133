use crate::model::description::{SdpKind, SessionDescription};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("unrecognized description type '{kind}'")]
    UnknownKind { kind: String },
}

/// Wire representation of one signaling message.
///
/// Serialized as `{"type": ..., "sdp": ..., "video_transform": ...}` and sent
/// as an HTTP POST body. Replies use the same schema; servers may omit
/// `video_transform`, which decodes as empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignalingEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub sdp: String,
    #[serde(default)]
    pub video_transform: String,
}

impl SignalingEnvelope {
    /// Build the outbound envelope for a finalized local description.
    pub fn from_description(desc: &SessionDescription, video_transform: &str) -> Self {
        Self {
            kind: desc.kind.as_str().to_string(),
            sdp: desc.sdp.clone(),
            video_transform: video_transform.to_string(),
        }
    }

    /// Classify the envelope into a description.
    ///
    /// Anything other than exactly `"offer"` is treated as an answer. The
    /// lenient default is inherited from the signaling servers this client
    /// talks to; [`description_strict`](Self::description_strict) rejects
    /// unknown strings instead.
    pub fn description(&self) -> SessionDescription {
        let kind = if self.kind == "offer" {
            SdpKind::Offer
        } else {
            SdpKind::Answer
        };
        SessionDescription::new(kind, self.sdp.clone())
    }

    /// Classify the envelope, rejecting anything but `"offer"` / `"answer"`.
    pub fn description_strict(&self) -> Result<SessionDescription, CodecError> {
        match self.kind.as_str() {
            "offer" => Ok(SessionDescription::new(SdpKind::Offer, self.sdp.clone())),
            "answer" => Ok(SessionDescription::new(SdpKind::Answer, self.sdp.clone())),
            other => Err(CodecError::UnknownKind {
                kind: other.to_string(),
            }),
        }
    }
}
