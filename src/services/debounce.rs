//! Quiet-interval debouncing for bursts of scroll events.
//!
//! Every [`Debouncer::notify`] aborts the pending timer task and spawns a
//! new one, so only the last value of a burst is delivered, once the
//! stream has been quiet for the whole interval. Must be used from inside a
//! tokio runtime.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

/// Quiet interval used for scroll events.
pub const QUIET_INTERVAL: Duration = Duration::from_millis(100);

pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
    settled_tx: mpsc::UnboundedSender<T>,
    settled_rx: mpsc::UnboundedReceiver<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new() -> Self {
        Self::with_interval(QUIET_INTERVAL)
    }

    pub fn with_interval(quiet: Duration) -> Self {
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        Self {
            quiet,
            pending: None,
            settled_tx,
            settled_rx,
        }
    }

    pub fn interval(&self) -> Duration {
        self.quiet
    }

    /// Schedules `value` for delivery after the quiet interval, replacing
    /// whatever was scheduled before.
    pub fn notify(&mut self, value: T) {
        self.cancel();

        let tx = self.settled_tx.clone();
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            time::sleep(quiet).await;
            // The receiver lives as long as `self`.
            let _ = tx.send(value);
        }));
    }

    /// Drops the scheduled value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while a value is waiting for its quiet interval to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Waits for the next settled value.
    pub async fn recv(&mut self) -> Option<T> {
        let value = self.settled_rx.recv().await;
        if self.pending.as_ref().is_some_and(|h| h.is_finished()) {
            self.pending = None;
        }
        value
    }

    /// Waits for any scheduled value to settle and returns the newest
    /// settled value that has not been received yet.
    pub async fn settle(&mut self) -> Option<T> {
        if let Some(handle) = self.pending.take() {
            if let Err(e) = handle.await {
                log::debug!("Debounce timer ended early: {}", e);
            }
        }

        let mut latest = None;
        while let Ok(value) = self.settled_rx.try_recv() {
            latest = Some(value);
        }
        latest
    }
}

impl<T: Send + 'static> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
