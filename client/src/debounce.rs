use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A cancellable timer with a single pending slot.
///
/// Each [`Debouncer::schedule`] call cancels whatever was still waiting, so
/// only the last action scheduled within `delay` of idle time runs.
pub struct Debouncer {
    delay: Duration,
    pending: Option<CancellationToken>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The returned handle resolves to `true` if the action ran and `false`
    /// if a later call superseded it.
    pub fn schedule<F>(&mut self, action: F) -> JoinHandle<bool>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!("Debounced action superseded");
                    false
                }
                _ = tokio::time::sleep(delay) => {
                    action.await;
                    true
                }
            }
        })
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_action_runs() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let runs = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..3 {
            let runs = runs.clone();
            handles.push(debouncer.schedule(async move {
                runs.fetch_add(1, Ordering::SeqCst);
            }));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }
        assert_eq!(outcomes, vec![false, false, true]);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_action_waits_for_idle_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let handle = debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        assert!(handle.await.unwrap());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_out_actions_all_run() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let first = debouncer.schedule(async {});
        tokio::time::sleep(Duration::from_millis(400)).await;
        let second = debouncer.schedule(async {});
        assert!(first.await.unwrap());
        assert!(second.await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_action() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let handle = debouncer.schedule(async {});
        debouncer.cancel();
        assert!(!handle.await.unwrap());
    }
}
