//! Graceful shutdown signal for the worker's HTTP surface.

use tokio::sync::watch;

/// Broadcasts a one-way shutdown signal to the server and any background
/// listeners.
#[derive(Debug)]
pub struct ShutdownSignal {
    sender: watch::Sender<bool>,
}

impl ShutdownSignal {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);
        Self { sender }
    }

    /// Marks shutdown as triggered and wakes all listeners.
    ///
    /// The value is latched even when no receiver is subscribed yet, so a
    /// `wait` that starts after the trigger still completes.
    pub fn trigger(&self) {
        self.sender.send_replace(true);
    }

    /// A future that completes once shutdown has been triggered.
    pub async fn wait(&self) {
        let mut receiver = self.sender.subscribe();
        // Already triggered before we subscribed.
        if *receiver.borrow() {
            return;
        }
        let _ = receiver.changed().await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Completes on ctrl-c; used with `axum::serve(...).with_graceful_shutdown`.
pub async fn ctrl_c() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn wait_completes_after_trigger() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        tokio::time::timeout(Duration::from_secs(1), signal.wait())
            .await
            .expect("wait should complete after trigger");
    }

    #[tokio::test]
    async fn wait_pends_until_triggered() {
        let signal = ShutdownSignal::new();
        let pending = tokio::time::timeout(Duration::from_millis(20), signal.wait()).await;
        assert!(pending.is_err(), "wait should pend before trigger");
    }
}
