use huddle_client::{ClientConfig, ClientError, MediaError, SessionCoordinator, SessionParts};
use huddle_core::RoomId;
use huddle_server::DisconnectPolicy;
use std::sync::Arc;

use crate::integration::{ROOM, init_tracing};
use crate::utils::{InProcessRelay, LoopbackNetwork, StaticCapture};

#[tokio::test]
async fn test_media_denied() {
    init_tracing();

    let relay = InProcessRelay::start(DisconnectPolicy::Announce);
    let network = LoopbackNetwork::new();
    let (channel, events) = relay.connect().await;

    let parts = SessionParts {
        capture: Arc::new(StaticCapture::denied()),
        session: network.session("p1"),
        channel: channel.clone(),
        events,
    };
    let result =
        SessionCoordinator::enter(RoomId::from(ROOM), parts, ClientConfig::default()).await;

    assert!(matches!(
        result,
        Err(ClientError::MediaAcquisition(MediaError::PermissionDenied))
    ));
    assert!(channel.emitted().is_empty(), "Nothing is emitted");
    assert!(!network.is_online("p1"), "The peer session is never opened");
    assert!(relay.members(ROOM).await.is_empty());
}
