
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

use huddle_client::{
    ClientConfig, ClientError, LocalCapture, RoomSnapshot, SessionCoordinator, SessionHandle,
    SessionParts,
};
use huddle_core::{PeerId, RoomId};

use crate::utils::{InProcessRelay, LoopbackNetwork, LoopbackSession, RelayChannel, StaticCapture};

/// Upper bound for any snapshot condition to become true.
pub const WAIT: Duration = Duration::from_secs(5);

pub const ROOM: &str = "abc-def-ghi";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub struct TestPeer {
    pub handle: SessionHandle,
    pub channel: Arc<RelayChannel>,
    pub session: Arc<LoopbackSession>,
}

/// Enter `ROOM` through the in-process relay with a loopback media session.
pub async fn enter_peer(
    relay: &InProcessRelay,
    network: &LoopbackNetwork,
    peer_id: &str,
) -> Result<TestPeer, ClientError> {
    enter_peer_with(
        relay,
        network,
        peer_id,
        Arc::new(StaticCapture::granted(peer_id)),
        ClientConfig::default(),
    )
    .await
}

pub async fn enter_peer_with(
    relay: &InProcessRelay,
    network: &LoopbackNetwork,
    peer_id: &str,
    capture: Arc<dyn LocalCapture>,
    config: ClientConfig,
) -> Result<TestPeer, ClientError> {
    let (channel, events) = relay.connect().await;
    let session = network.session(peer_id);

    let parts = SessionParts {
        capture,
        session: session.clone(),
        channel: channel.clone(),
        events,
    };
    let handle = SessionCoordinator::enter(RoomId::from(ROOM), parts, config).await?;

    Ok(TestPeer {
        handle,
        channel,
        session,
    })
}

/// Both `a` and `b` have entries with a stream.
pub fn sees_both(snapshot: &RoomSnapshot, a: &str, b: &str) -> bool {
    [a, b].iter().all(|id| {
        snapshot
            .participant(&PeerId::from(*id))
            .is_some_and(|state| state.stream.is_some())
    })
}
