//! Cancellable scheduled-task debounce primitive

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// A debounce timer: at most one pending scheduled task at a time.
///
/// Scheduling always cancels the prior pending task before arming a new
/// one. Cancellation only affects the not-yet-fired timer; work already
/// triggered by an earlier expiry is not touched.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use listview_lib::view::Debounce;
///
/// # async fn demo() {
/// let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
/// let mut debounce = Debounce::new();
/// debounce.schedule(Duration::from_millis(500), tx.clone(), "fetch");
/// // Re-arming supersedes the pending task.
/// debounce.schedule(Duration::from_millis(500), tx, "fetch");
/// assert_eq!(rx.recv().await, Some("fetch"));
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Debounce {
    handle: Option<JoinHandle<()>>,
}

impl Debounce {
    /// Creates an idle debounce timer.
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Arms the timer: after `delay`, `message` is sent on `tx`. Any prior
    /// pending task is cancelled first.
    ///
    /// Requires a tokio runtime.
    pub fn schedule<T: Send + 'static>(
        &mut self,
        delay: Duration,
        tx: UnboundedSender<T>,
        message: T,
    ) {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(message);
        }));
    }

    /// Cancels the pending task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Returns `true` while a scheduled task is pending.
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debounce {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut debounce = Debounce::new();
        debounce.schedule(Duration::from_millis(500), tx, 1u32);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(rx.try_recv().ok(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_supersedes_pending_task() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut debounce = Debounce::new();
        debounce.schedule(Duration::from_millis(500), tx.clone(), 1u32);

        tokio::time::sleep(Duration::from_millis(300)).await;
        debounce.schedule(Duration::from_millis(500), tx, 2u32);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(rx.try_recv().ok(), Some(2));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_task() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut debounce = Debounce::new();
        debounce.schedule(Duration::from_millis(500), tx, 1u32);
        debounce.cancel();

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(rx.try_recv().is_err());
        assert!(!debounce.is_armed());
    }
}
