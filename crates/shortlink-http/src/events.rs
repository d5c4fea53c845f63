//! Process-wide session-expiry broadcast.

use tokio::sync::broadcast;
use tracing::{debug, warn};

use shortlink_core::SessionExpired;

/// Buffered notifications per subscriber before the oldest is dropped.
const EVENT_CAPACITY: usize = 16;

/// Publish side of the session-expired channel.
///
/// Clones share one channel. Publishing with no subscribers is not an error.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionExpired>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    /// Register interest in session expiry.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionExpired> {
        self.sender.subscribe()
    }

    pub(crate) fn publish(&self, event: SessionExpired) {
        warn!(reason = event.reason.as_str(), status = ?event.status, "session expired");
        if self.sender.send(event).is_err() {
            debug!("no subscribers for session-expired event");
        }
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
