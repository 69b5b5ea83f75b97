use huddle_core::{ClientEvent, PeerId, RoomId, ServerEvent};
use huddle_server::ServerConfig;

use crate::integration::{init_tracing, spawn_test_server};
use crate::utils::{EVENT_TIMEOUT_MS, TestClient};

#[tokio::test]
async fn test_two_clients_over_socket() {
    init_tracing();

    let addr = spawn_test_server(ServerConfig::default()).await;
    let room = RoomId::from("abc-def-ghi");

    let mut alice = TestClient::connect(addr).await.expect("alice connects");
    let mut bob = TestClient::connect(addr).await.expect("bob connects");

    alice
        .send(&ClientEvent::join(room.clone(), PeerId::from("p1")))
        .await
        .unwrap();
    alice.expect_silence().await.unwrap();

    bob.send(&ClientEvent::join(room.clone(), PeerId::from("p2")))
        .await
        .unwrap();
    assert_eq!(
        alice.recv(EVENT_TIMEOUT_MS).await.unwrap(),
        ServerEvent::UserConnected(PeerId::from("p2"))
    );

    bob.send(&ClientEvent::ToggleMic {
        room_id: room.clone(),
        user_id: PeerId::from("p2"),
        enabled: Some(true),
    })
    .await
    .unwrap();
    assert_eq!(
        alice.recv(EVENT_TIMEOUT_MS).await.unwrap(),
        ServerEvent::ToggleMic {
            user_id: PeerId::from("p2"),
            enabled: Some(true),
        }
    );
    bob.expect_silence().await.expect("No echo to the sender");

    bob.close().await.unwrap();
    assert_eq!(
        alice.recv(EVENT_TIMEOUT_MS).await.unwrap(),
        ServerEvent::UserDisconnected {
            user_id: PeerId::from("p2")
        },
        "Closing the socket announces the departure"
    );

    alice.close().await.unwrap();
}

#[tokio::test]
async fn test_legacy_toggle_without_state_is_relayed() {
    init_tracing();

    let addr = spawn_test_server(ServerConfig::default()).await;
    let mut alice = TestClient::connect(addr).await.unwrap();
    let mut bob = TestClient::connect(addr).await.unwrap();

    alice
        .send_raw(r#"{"event":"join-room","data":{"roomId":"r","peerId":"p1"}}"#)
        .await
        .unwrap();
    bob.send_raw(r#"{"event":"join-room","data":{"roomId":"r","peerId":"p2"}}"#)
        .await
        .unwrap();
    alice.recv(EVENT_TIMEOUT_MS).await.unwrap();

    bob.send_raw(r#"{"event":"toggle-video","data":{"roomId":"r","userId":"p2"}}"#)
        .await
        .unwrap();
    assert_eq!(
        alice.recv(EVENT_TIMEOUT_MS).await.unwrap(),
        ServerEvent::ToggleVideo {
            user_id: PeerId::from("p2"),
            enabled: None,
        }
    );
}
