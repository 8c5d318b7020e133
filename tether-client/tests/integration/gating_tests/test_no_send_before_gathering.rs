use std::time::Duration;

use tether_client::SessionPhase;
use tether_core::{SdpKind, SessionDescription, VideoTransform};

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{MockEngine, MockMediaEndpoint, MockSignalingTransport};

// The peer cannot use an incomplete description, so nothing may cross the
// wire until the gathering-complete signal arrives.
#[tokio::test]
async fn test_no_send_before_gathering() {
    init_tracing();

    let engine = MockEngine::manual_gathering();
    let transport = MockSignalingTransport::answering_with("v=0 remote-answer");
    let media = MockMediaEndpoint::new(VideoTransform::None);
    let mut session = create_test_session(engine.clone(), transport.clone(), media);

    let handle = tokio::spawn(async move {
        let result = session.start_as_initiator().await;
        (session, result)
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(
        transport.sent_count().await,
        0,
        "The offer must be held back while gathering runs"
    );
    assert!(engine.gate_armed().await, "The gate should be armed by now");

    let fired = engine
        .fire_gathering(SessionDescription::new(SdpKind::Offer, "v=0 finalized"))
        .await;
    assert!(fired);

    let (session, result) = handle.await.unwrap();
    result.expect("Negotiation should succeed once gathering completes");

    assert_eq!(session.phase(), SessionPhase::Connected);
    let sent = transport.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].sdp, "v=0 finalized");
}
