use huddle_core::{ConnectionId, PeerId, ServerEvent};
use huddle_server::DisconnectPolicy;

use crate::integration::{create_test_registry, init_tracing};
use crate::utils::{EVENT_TIMEOUT_MS, expect_silence, join, members, wait_for_event};

#[tokio::test]
async fn test_disconnect_announces_departure() {
    init_tracing();

    let (registry, mut signal_rx, _signaling) = create_test_registry(DisconnectPolicy::Announce);
    let a = ConnectionId::new();
    let b = ConnectionId::new();

    join(&registry, a, "room", "p1").await.unwrap();
    join(&registry, b, "room", "p2").await.unwrap();
    wait_for_event(&mut signal_rx, &a, EVENT_TIMEOUT_MS)
        .await
        .unwrap();

    registry.disconnect(b).await.unwrap();

    let event = wait_for_event(&mut signal_rx, &a, EVENT_TIMEOUT_MS)
        .await
        .expect("A should hear that p2 is gone");
    assert_eq!(
        event,
        ServerEvent::UserDisconnected {
            user_id: PeerId::from("p2")
        }
    );

    assert_eq!(members(&registry, "room").await.unwrap(), vec![a]);
}

#[tokio::test]
async fn test_disconnect_reports_last_announced_peer_per_room() {
    init_tracing();

    let (registry, _signal_rx, signaling) = create_test_registry(DisconnectPolicy::Announce);
    let a = ConnectionId::new();
    let b = ConnectionId::new();
    let c = ConnectionId::new();

    join(&registry, a, "room-one", "p1").await.unwrap();
    join(&registry, c, "room-two", "p3").await.unwrap();
    join(&registry, b, "room-one", "p2").await.unwrap();
    join(&registry, b, "room-one", "p2-renewed").await.unwrap();
    join(&registry, b, "room-two", "p2-other").await.unwrap();

    registry.disconnect(b).await.unwrap();
    members(&registry, "room-one").await.unwrap();

    assert_eq!(
        signaling.events_for(&a).await.last(),
        Some(&ServerEvent::UserDisconnected {
            user_id: PeerId::from("p2-renewed")
        })
    );
    assert_eq!(
        signaling.events_for(&c).await.last(),
        Some(&ServerEvent::UserDisconnected {
            user_id: PeerId::from("p2-other")
        })
    );
}

#[tokio::test]
async fn test_disconnect_of_unsubscribed_connection_is_quiet() {
    init_tracing();

    let (registry, mut signal_rx, _signaling) = create_test_registry(DisconnectPolicy::Announce);
    let a = ConnectionId::new();

    join(&registry, a, "room", "p1").await.unwrap();
    registry.disconnect(ConnectionId::new()).await.unwrap();

    expect_silence(&mut signal_rx).await.unwrap();
}
