use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use webrtc::api::media_engine::MIME_TYPE_VP8;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;
use webrtc::track::track_remote::TrackRemote;

use crate::media::MediaEndpoint;
use tether_core::VideoTransform;

/// Sample-fed media endpoint backed by a single VP8 track.
///
/// Frame producers write into [`sample_track`](Self::sample_track); the most
/// recent incoming track is kept until it is cleared or replaced.
pub struct StaticMediaEndpoint {
    track: Arc<TrackLocalStaticSample>,
    incoming: Mutex<Option<Arc<TrackRemote>>>,
    transform: VideoTransform,
}

impl StaticMediaEndpoint {
    pub fn new(transform: VideoTransform) -> Self {
        let track = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_VP8.to_owned(),
                ..Default::default()
            },
            "video".to_owned(),
            "tether".to_owned(),
        ));

        Self {
            track,
            incoming: Mutex::new(None),
            transform,
        }
    }

    /// The sample sink a frame producer writes into.
    pub fn sample_track(&self) -> Arc<TrackLocalStaticSample> {
        Arc::clone(&self.track)
    }

    /// The currently bound remote track, if any.
    pub async fn incoming_track(&self) -> Option<Arc<TrackRemote>> {
        self.incoming.lock().await.clone()
    }
}

#[async_trait]
impl MediaEndpoint for StaticMediaEndpoint {
    fn outgoing_track(&self) -> Arc<dyn TrackLocal + Send + Sync> {
        Arc::clone(&self.track) as Arc<dyn TrackLocal + Send + Sync>
    }

    async fn deliver_incoming_track(&self, track: Arc<TrackRemote>) {
        info!("Incoming {:?} track '{}' bound", track.kind(), track.id());
        *self.incoming.lock().await = Some(track);
    }

    async fn clear_incoming_track(&self) {
        if self.incoming.lock().await.take().is_some() {
            info!("Incoming track cleared");
        }
    }

    fn negotiation_tag(&self) -> VideoTransform {
        self.transform
    }
}
