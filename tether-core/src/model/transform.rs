use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cosmetic post-processing effect requested from the remote peer.
///
/// Forwarded verbatim in the signaling envelope; the negotiation core assigns
/// no meaning to it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum VideoTransform {
    #[default]
    None,
    Edges,
    Cartoon,
    Rotate,
}

impl VideoTransform {
    /// The tag spelling the signaling server expects.
    pub fn as_tag(&self) -> &'static str {
        match self {
            VideoTransform::None => "none",
            VideoTransform::Edges => "edges",
            VideoTransform::Cartoon => "cartoon",
            VideoTransform::Rotate => "rotate",
        }
    }
}

impl fmt::Display for VideoTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for VideoTransform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(VideoTransform::None),
            "edges" => Ok(VideoTransform::Edges),
            "cartoon" => Ok(VideoTransform::Cartoon),
            "rotate" => Ok(VideoTransform::Rotate),
            other => Err(format!(
                "unknown video transform '{other}' (expected none, edges, cartoon or rotate)"
            )),
        }
    }
}
