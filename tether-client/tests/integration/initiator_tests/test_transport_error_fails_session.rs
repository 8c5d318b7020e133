use tether_client::{NegotiationError, SessionPhase};
use tether_core::{SdpKind, VideoTransform};

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{EngineOp, MockEngine, MockMediaEndpoint, MockSignalingTransport};

// Scenario: the signaling endpoint answers with an HTTP error. The session
// fails with a transport error and no remote description is ever applied.
#[tokio::test]
async fn test_transport_error_fails_session() {
    init_tracing();

    let engine = MockEngine::new();
    let transport = MockSignalingTransport::failing();
    let media = MockMediaEndpoint::new(VideoTransform::None);
    let mut session = create_test_session(engine.clone(), transport.clone(), media.clone());

    let err = session
        .start_as_initiator()
        .await
        .expect_err("Negotiation should fail");

    assert!(matches!(err, NegotiationError::Transport(_)), "{err:?}");
    assert_eq!(session.phase(), SessionPhase::Failed);

    let ops = engine.ops().await;
    assert!(
        !ops.iter()
            .any(|op| matches!(op, EngineOp::SetRemote(_))),
        "No remote description may be applied after a transport failure"
    );
    assert_eq!(ops.last(), Some(&EngineOp::SetLocal(SdpKind::Offer)));

    assert!(
        media.clear_count() >= 1,
        "The media pipeline must be left detached on failure"
    );
}
