mod description;
mod envelope;
mod session;
mod transform;

pub use description::{SdpKind, SessionDescription, Side};
pub use envelope::{CodecError, SignalingEnvelope};
pub use session::SessionId;
pub use transform::VideoTransform;
