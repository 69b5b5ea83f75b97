use huddle_core::{ClientEvent, ConnectionId, RoomId, ServerEvent};
use huddle_server::DisconnectPolicy;

use crate::integration::{create_test_registry, init_tracing};
use crate::utils::{EVENT_TIMEOUT_MS, expect_silence, join, members, wait_for_event};

#[tokio::test]
async fn test_join_without_peer_id_reports_error() {
    init_tracing();

    let (registry, mut signal_rx, _signaling) = create_test_registry(DisconnectPolicy::Announce);
    let a = ConnectionId::new();
    let b = ConnectionId::new();

    join(&registry, a, "room", "p1").await.unwrap();

    registry
        .dispatch(
            b,
            ClientEvent::JoinRoom {
                room_id: Some(RoomId::from("room")),
                peer_id: None,
            },
        )
        .await
        .unwrap();

    let event = wait_for_event(&mut signal_rx, &b, EVENT_TIMEOUT_MS)
        .await
        .expect("The sender gets an error");
    assert_eq!(event, ServerEvent::error("Failed to join room"));

    expect_silence(&mut signal_rx)
        .await
        .expect("Nothing is broadcast for a rejected join");

    let room = members(&registry, "room").await.unwrap();
    assert_eq!(room, vec![a], "The room is unchanged");
}

#[tokio::test]
async fn test_join_with_blank_room_reports_error() {
    init_tracing();

    let (registry, mut signal_rx, _signaling) = create_test_registry(DisconnectPolicy::Announce);
    let a = ConnectionId::new();

    join(&registry, a, "  ", "p1").await.unwrap();

    let event = wait_for_event(&mut signal_rx, &a, EVENT_TIMEOUT_MS)
        .await
        .expect("The sender gets an error");
    assert_eq!(event, ServerEvent::error("Failed to join room"));
    assert!(members(&registry, "  ").await.unwrap().is_empty());
}
