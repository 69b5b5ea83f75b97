use tokio::sync::oneshot;

/// Local user actions, sent from a [`SessionHandle`](crate::SessionHandle) to
/// the coordinator task.
#[derive(Debug)]
pub enum SessionCommand {
    /// Replies with the new mic state.
    ToggleMic { reply: oneshot::Sender<bool> },
    /// Replies with the new video state.
    ToggleVideo { reply: oneshot::Sender<bool> },
    Leave { reply: oneshot::Sender<()> },
}
