use huddle_client::SessionPhase;
use huddle_core::ServerEvent;
use huddle_server::DisconnectPolicy;

use crate::integration::{WAIT, enter_peer, init_tracing};
use crate::utils::{InProcessRelay, LoopbackNetwork};

#[tokio::test]
async fn test_relay_error_recorded() {
    init_tracing();

    let relay = InProcessRelay::start(DisconnectPolicy::Announce);
    let network = LoopbackNetwork::new();

    let a = enter_peer(&relay, &network, "p1").await.unwrap();
    assert!(a.handle.snapshot().last_error.is_none());

    relay
        .inject(a.channel.connection(), ServerEvent::error("Failed to join room"))
        .await;

    let view = a
        .handle
        .wait_for(WAIT, |s| s.last_error.is_some())
        .await
        .expect("The error should be recorded");
    assert_eq!(view.last_error.as_deref(), Some("Failed to join room"));
    assert_eq!(view.phase, SessionPhase::Joined, "An error is not fatal");
}
