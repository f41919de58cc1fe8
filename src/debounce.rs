//! Input debouncing.
//!
//! Text and numeric filter inputs fire on every keystroke; re-running the
//! whole pipeline each time is wasted work. The debouncer delays the refresh
//! and lets a newer keystroke supersede a pending one, so only the final
//! value in a burst triggers a recompute.
//!
//! Superseding is generation-based: each scheduled call bumps a shared
//! counter and the sleeping task only runs its callback if the counter is
//! still its own when the timer fires. No task handles to track or abort.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delay for free-text search input.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Delay for numeric range inputs, a little longer since people type digits
/// in bursts.
pub const NUMERIC_DEBOUNCE_MS: u64 = 500;

/// Trailing-edge debouncer over a fixed delay.
#[derive(Debug, Clone)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
    delay: Duration,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            delay,
        }
    }

    /// Debouncer tuned for the search box.
    pub fn for_search() -> Self {
        Self::new(Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }

    /// Debouncer tuned for numeric range inputs.
    pub fn for_numeric() -> Self {
        Self::new(Duration::from_millis(NUMERIC_DEBOUNCE_MS))
    }

    /// Schedule `callback` to run after the delay, superseding any call
    /// scheduled earlier on this debouncer that has not fired yet.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) == my_generation {
                callback();
            }
        });
    }

    /// Drop any pending call without scheduling a new one.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_in_burst_fires() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let fired = Arc::clone(&fired);
            debouncer.call(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_call_supersedes_partially_elapsed_timer() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let fired = Arc::new(AtomicUsize::new(0));

        let first = Arc::clone(&fired);
        debouncer.call(move || {
            first.fetch_add(10, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(150)).await;

        let second = Arc::clone(&fired);
        debouncer.call(move || {
            second.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_call() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let fired = Arc::new(AtomicUsize::new(0));

        let count = Arc::clone(&fired);
        debouncer.call(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_each_fire() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let count = Arc::clone(&fired);
            debouncer.call(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(400)).await;
        }

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
