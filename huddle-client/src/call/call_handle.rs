use crate::media::MediaCall;
use huddle_core::PeerId;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::AbortHandle;

static NEXT_CALL_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallId(u64);

impl CallId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CALL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "call#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallDirection {
    Outbound,
    Inbound,
}

#[derive(Default)]
struct Slot {
    closed: bool,
    media: Option<Arc<dyn MediaCall>>,
}

/// Shared between a [`CallHandle`] and its negotiation task. The media call
/// is attached once the dial completes; closing either side first is safe.
#[derive(Clone, Default)]
pub(crate) struct CallSlot(Arc<Mutex<Slot>>);

impl CallSlot {
    pub(crate) fn with_media(media: Arc<dyn MediaCall>) -> Self {
        Self(Arc::new(Mutex::new(Slot {
            closed: false,
            media: Some(media),
        })))
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store the dialed call. Returns `false`, and closes `media`, if the
    /// handle was closed while dialing.
    pub(crate) async fn attach(&self, media: Arc<dyn MediaCall>) -> bool {
        {
            let mut slot = self.lock();
            if !slot.closed {
                slot.media = Some(media);
                return true;
            }
        }
        media.close().await;
        false
    }

    /// Marks the slot closed and hands back the media call, if any. `None`
    /// on the outer level means it was already closed.
    fn close(&self) -> Option<Option<Arc<dyn MediaCall>>> {
        let mut slot = self.lock();
        if slot.closed {
            return None;
        }
        slot.closed = true;
        Some(slot.media.take())
    }

    fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

/// A call with one remote peer plus the task negotiating it.
#[derive(Clone)]
pub struct CallHandle {
    id: CallId,
    remote: PeerId,
    direction: CallDirection,
    slot: CallSlot,
    negotiation: AbortHandle,
}

impl CallHandle {
    pub(crate) fn new(
        id: CallId,
        remote: PeerId,
        direction: CallDirection,
        slot: CallSlot,
        negotiation: AbortHandle,
    ) -> Self {
        Self {
            id,
            remote,
            direction,
            slot,
            negotiation,
        }
    }

    pub fn id(&self) -> CallId {
        self.id
    }

    pub fn remote(&self) -> &PeerId {
        &self.remote
    }

    pub fn direction(&self) -> CallDirection {
        self.direction
    }

    pub fn is_closed(&self) -> bool {
        self.slot.is_closed()
    }

    /// Returns `false` if the call was already closed.
    pub(crate) async fn close(&self) -> bool {
        let Some(media) = self.slot.close() else {
            return false;
        };
        self.negotiation.abort();
        if let Some(media) = media {
            media.close().await;
        }
        true
    }
}

impl fmt::Debug for CallHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallHandle")
            .field("id", &self.id)
            .field("remote", &self.remote)
            .field("direction", &self.direction)
            .field("closed", &self.is_closed())
            .finish()
    }
}
