use async_trait::async_trait;
use std::sync::Arc;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_remote::TrackRemote;

use tether_core::VideoTransform;

/// Boundary to the media pipeline that produces outgoing frames and displays
/// incoming ones.
///
/// The negotiation core treats tracks as opaque handles; it never looks at
/// pixel data, frame rate or resolution.
#[async_trait]
pub trait MediaEndpoint: Send + Sync {
    /// The live outgoing track to attach to the connection before
    /// negotiating.
    fn outgoing_track(&self) -> Arc<dyn TrackLocal + Send + Sync>;

    /// A remote track started; hand it to the display side.
    async fn deliver_incoming_track(&self, track: Arc<TrackRemote>);

    /// The remote track went away (disconnect, failure or teardown).
    async fn clear_incoming_track(&self);

    /// Cosmetic effect tag echoed into the signaling envelope, never
    /// interpreted here.
    fn negotiation_tag(&self) -> VideoTransform;
}
