//! Cancellable transient-value slot.
//!
//! A [`TransientSlot`] holds a value for a bounded display window and then
//! clears itself. Publishing a new value supersedes the pending one rather
//! than stacking; clearing invalidates the pending timer. Both reward
//! notices and query advisories are built on this.
//!
//! Supersession uses the same generation idiom as the session controller's
//! reset guard: every publish and clear bumps a generation counter, and a
//! timer only clears the slot if its captured generation still matches. A
//! timer task that has already passed its sleep when a new value lands is
//! a stale no-op, never a clear of the new value.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A slot holding at most one value, cleared after a display window elapses.
pub struct TransientSlot<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

struct Inner<T> {
    value: Option<T>,
    /// Bumped on every publish and clear; a timer whose captured generation
    /// no longer matches belongs to a superseded value.
    generation: u64,
}

impl<T: Clone + Send + 'static> TransientSlot<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: None,
                generation: 0,
            })),
        }
    }

    /// Publish a value that self-clears after `window`.
    ///
    /// Any previously pending value and its timer are superseded.
    pub fn publish(&self, value: T, window: Duration) {
        let generation = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.value = Some(value);
            inner.generation
        };

        let slot = Arc::clone(&self.inner);
        // Anchor the window at publish time, not at the task's first poll.
        let sleep = tokio::time::sleep(window);
        tokio::spawn(async move {
            sleep.await;
            let mut inner = slot.lock().expect("slot lock poisoned");
            if inner.generation == generation {
                inner.value = None;
            }
        });
    }

    /// Publish a value with no expiry; it stays until [`clear`] or a later
    /// [`publish`] supersedes it.
    ///
    /// [`clear`]: TransientSlot::clear
    /// [`publish`]: TransientSlot::publish
    pub fn publish_sticky(&self, value: T) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.value = Some(value);
    }

    /// Invalidate any pending timer and empty the slot.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.value = None;
    }

    /// Current value, if the display window has not elapsed.
    pub fn get(&self) -> Option<T> {
        self.lock().value.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<T>> {
        self.inner.lock().expect("slot lock poisoned")
    }
}

impl<T: Clone + Send + 'static> Default for TransientSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Let spawned timer tasks run after time is advanced.
    async fn settle() {
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_value_clears_after_window() {
        let slot = TransientSlot::new();
        slot.publish("reward", Duration::from_secs(4));
        assert_eq!(slot.get(), Some("reward"));

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(slot.get(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_value_visible_before_window_elapses() {
        let slot = TransientSlot::new();
        slot.publish("reward", Duration::from_secs(4));

        tokio::time::advance(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(slot.get(), Some("reward"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_publish_supersedes_first() {
        let slot = TransientSlot::new();
        slot.publish("first", Duration::from_secs(4));
        slot.publish("second", Duration::from_secs(4));
        assert_eq!(slot.get(), Some("second"));

        // The first timer is stale; only the second window applies.
        tokio::time::advance(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(slot.get(), Some("second"));

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(slot.get(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_firing_does_not_clear_newer_value() {
        let slot = TransientSlot::new();
        // The first value's window ends while the second is mid-window.
        slot.publish("first", Duration::from_secs(2));
        slot.publish("second", Duration::from_secs(10));

        // t=3: the first timer fires as a stale no-op.
        tokio::time::advance(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(slot.get(), Some("second"));

        // t=11: the second's own timer clears it.
        tokio::time::advance(Duration::from_secs(8)).await;
        settle().await;
        assert_eq!(slot.get(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_invalidates_pending_timer() {
        let slot = TransientSlot::new();
        slot.publish("reward", Duration::from_secs(4));
        slot.clear();
        assert_eq!(slot.get(), None);

        // The stale timer firing later must not clear a newer value.
        slot.publish_sticky("persistent");
        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(slot.get(), Some("persistent"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sticky_value_never_expires() {
        let slot = TransientSlot::new();
        slot.publish_sticky("banner");

        tokio::time::advance(Duration::from_secs(3600)).await;
        settle().await;
        assert_eq!(slot.get(), Some("banner"));
    }
}
