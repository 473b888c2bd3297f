use tracing::{error, info};

use crate::ports::Notifier;

/// Fire-and-forget wrapper around a [`Notifier`].
///
/// One attempt per call; failures are logged at error level and dropped.
pub struct BestEffortNotifier<N> {
    inner: N,
}

impl<N: Notifier> BestEffortNotifier<N> {
    /// Wraps a notifier.
    pub fn new(inner: N) -> Self {
        Self { inner }
    }

    /// The wrapped notifier.
    pub fn inner(&self) -> &N {
        &self.inner
    }

    /// Sends `text` once. Never fails from the caller's point of view.
    pub async fn notify(&self, text: &str) {
        match self.inner.send(text).await {
            Ok(()) => info!(recipient = %self.inner.recipient(), text, "notification sent"),
            Err(e) => error!(recipient = %self.inner.recipient(), error = %e, "notification failed"),
        }
    }
}
