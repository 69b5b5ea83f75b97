use huddle_core::{PeerId, ServerEvent};
use huddle_server::DisconnectPolicy;

use crate::integration::{WAIT, enter_peer, init_tracing, sees_both};
use crate::utils::{InProcessRelay, LoopbackNetwork};

#[tokio::test]
async fn test_toggle_propagates() {
    init_tracing();

    let relay = InProcessRelay::start(DisconnectPolicy::Announce);
    let network = LoopbackNetwork::new();
    let p1 = PeerId::from("p1");

    let a = enter_peer(&relay, &network, "p1").await.unwrap();
    let b = enter_peer(&relay, &network, "p2").await.unwrap();
    for peer in [&a, &b] {
        peer.handle
            .wait_for(WAIT, |s| sees_both(s, "p1", "p2"))
            .await
            .unwrap();
    }

    assert!(a.handle.toggle_mic().await.unwrap(), "Mic is now on");
    assert!(a.handle.snapshot().local().unwrap().is_mic_on);

    b.handle
        .wait_for(WAIT, |s| s.participant(&p1).is_some_and(|p| p.is_mic_on))
        .await
        .expect("B should see p1 unmuted");

    assert!(!a.handle.toggle_mic().await.unwrap(), "Second toggle mutes again");
    assert!(!a.handle.snapshot().local().unwrap().is_mic_on);

    b.handle
        .wait_for(WAIT, |s| s.participant(&p1).is_some_and(|p| !p.is_mic_on))
        .await
        .expect("B should see p1 muted again");

    let b_view = b.handle.snapshot();
    assert!(
        b_view.participant(&p1).unwrap().is_video_on,
        "Video is untouched by mic toggles"
    );
}

#[tokio::test]
async fn test_local_video_toggle_twice_restores() {
    init_tracing();

    let relay = InProcessRelay::start(DisconnectPolicy::Announce);
    let network = LoopbackNetwork::new();

    let a = enter_peer(&relay, &network, "p1").await.unwrap();

    let before = a.handle.snapshot().local().unwrap().is_video_on;
    assert_eq!(a.handle.toggle_video().await.unwrap(), !before);
    assert_eq!(a.handle.toggle_video().await.unwrap(), before);
    assert_eq!(a.handle.snapshot().local().unwrap().is_video_on, before);
}

#[tokio::test]
async fn test_toggle_without_state_flips() {
    init_tracing();

    let relay = InProcessRelay::start(DisconnectPolicy::Announce);
    let network = LoopbackNetwork::new();
    let p1 = PeerId::from("p1");

    let a = enter_peer(&relay, &network, "p1").await.unwrap();
    let b = enter_peer(&relay, &network, "p2").await.unwrap();
    b.handle
        .wait_for(WAIT, |s| sees_both(s, "p1", "p2"))
        .await
        .unwrap();

    let legacy = ServerEvent::ToggleVideo {
        user_id: p1.clone(),
        enabled: None,
    };

    relay.inject(b.channel.connection(), legacy.clone()).await;
    b.handle
        .wait_for(WAIT, |s| s.participant(&p1).is_some_and(|p| !p.is_video_on))
        .await
        .expect("A bare toggle flips video off");

    relay.inject(b.channel.connection(), legacy).await;
    b.handle
        .wait_for(WAIT, |s| s.participant(&p1).is_some_and(|p| p.is_video_on))
        .await
        .expect("A second bare toggle flips it back");

    drop(a);
}
