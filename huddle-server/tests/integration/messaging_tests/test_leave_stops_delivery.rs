use huddle_core::{ConnectionId, PeerId, ServerEvent};
use huddle_server::DisconnectPolicy;

use crate::integration::{create_test_registry, init_tracing};
use crate::utils::{join, leave, members, toggle_mic};

#[tokio::test]
async fn test_leave_stops_delivery() {
    init_tracing();

    let (registry, _signal_rx, signaling) = create_test_registry(DisconnectPolicy::Announce);
    let a = ConnectionId::new();
    let b = ConnectionId::new();

    join(&registry, a, "room", "p1").await.unwrap();
    join(&registry, b, "room", "p2").await.unwrap();
    members(&registry, "room").await.unwrap();
    signaling.clear().await;

    leave(&registry, b, "room", "p2").await.unwrap();
    toggle_mic(&registry, a, "room", "p1", Some(true)).await.unwrap();
    members(&registry, "room").await.unwrap();

    assert_eq!(
        signaling.events_for(&a).await,
        vec![ServerEvent::UserDisconnected {
            user_id: PeerId::from("p2")
        }]
    );
    assert!(
        signaling.events_for(&b).await.is_empty(),
        "A departed connection receives nothing more from the room"
    );
}

#[tokio::test]
async fn test_leave_without_join_still_broadcasts() {
    init_tracing();

    let (registry, _signal_rx, signaling) = create_test_registry(DisconnectPolicy::Announce);
    let a = ConnectionId::new();
    let stranger = ConnectionId::new();

    join(&registry, a, "room", "p1").await.unwrap();
    leave(&registry, stranger, "room", "ghost").await.unwrap();
    members(&registry, "room").await.unwrap();

    assert_eq!(
        signaling.events_for(&a).await,
        vec![ServerEvent::UserDisconnected {
            user_id: PeerId::from("ghost")
        }]
    );
}

#[tokio::test]
async fn test_last_leave_drops_room() {
    init_tracing();

    let (registry, _signal_rx, _signaling) = create_test_registry(DisconnectPolicy::Announce);
    let a = ConnectionId::new();

    join(&registry, a, "room", "p1").await.unwrap();
    leave(&registry, a, "room", "p1").await.unwrap();

    assert!(members(&registry, "room").await.unwrap().is_empty());
}
