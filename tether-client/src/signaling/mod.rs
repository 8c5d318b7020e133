mod http_client;
mod signaling_transport;

pub use http_client::HttpSignalingClient;
pub use signaling_transport::{SignalingTransport, TransportError};
