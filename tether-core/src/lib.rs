pub mod model;

pub use model::{
    CodecError, SdpKind, SessionDescription, SessionId, Side, SignalingEnvelope, VideoTransform,
};
