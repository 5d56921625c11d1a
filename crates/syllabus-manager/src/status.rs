use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::sleep;

use syllabus_core::StatusState;

#[derive(Debug, Default)]
struct Shared {
    state: StatusState,
    /// Bumped on every write to the matching message. A timer only clears
    /// the message it was scheduled for.
    error_generation: u64,
    success_generation: u64,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Error,
    Success,
}

impl Slot {
    fn text(self, shared: &mut Shared) -> &mut Option<String> {
        match self {
            Slot::Error => &mut shared.state.error_text,
            Slot::Success => &mut shared.state.success_text,
        }
    }

    fn generation(self, shared: &mut Shared) -> &mut u64 {
        match self {
            Slot::Error => &mut shared.error_generation,
            Slot::Success => &mut shared.success_generation,
        }
    }
}

/// Read access to the status, shareable with timers and observers.
#[derive(Debug, Clone, Default)]
pub struct StatusHandle {
    inner: Arc<Mutex<Shared>>,
}

impl StatusHandle {
    pub fn snapshot(&self) -> StatusState {
        self.lock().state.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_busy(&self, busy: bool) {
        self.lock().state.busy = busy;
    }

    fn write(&self, slot: Slot, text: Option<String>) -> u64 {
        let mut shared = self.lock();
        *slot.text(&mut shared) = text;
        let generation = slot.generation(&mut shared);
        *generation += 1;
        *generation
    }

    fn expire(&self, slot: Slot, generation: u64) {
        let mut shared = self.lock();
        if *slot.generation(&mut shared) == generation {
            *slot.text(&mut shared) = None;
        }
    }
}

/// Keeps `busy` raised until dropped.
///
/// Dropping the guard lowers the flag on every exit path, including when
/// the action future itself is dropped mid-request.
#[must_use = "busy is lowered as soon as the guard is dropped"]
pub struct BusyGuard {
    handle: StatusHandle,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.handle.set_busy(false);
    }
}

/// Busy flag plus error and success messages that clear themselves.
///
/// Each message has at most one pending clear timer. Writing a message again
/// cancels the old timer and schedules a new one. Dropping the tracker
/// cancels everything still pending.
#[derive(Debug, Default)]
pub struct StatusTracker {
    handle: StatusHandle,
    error_timer: Option<AbortHandle>,
    success_timer: Option<AbortHandle>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> StatusHandle {
        self.handle.clone()
    }

    pub fn snapshot(&self) -> StatusState {
        self.handle.snapshot()
    }

    pub fn set_busy(&self, busy: bool) {
        self.handle.set_busy(busy);
    }

    /// Raise `busy` for as long as the returned guard lives.
    pub fn begin_busy(&self) -> BusyGuard {
        self.handle.set_busy(true);
        BusyGuard {
            handle: self.handle.clone(),
        }
    }

    pub fn set_error(&mut self, text: impl Into<String>, clear_after: Duration) {
        self.set_message(Slot::Error, text.into(), clear_after);
    }

    pub fn set_success(&mut self, text: impl Into<String>, clear_after: Duration) {
        self.set_message(Slot::Success, text.into(), clear_after);
    }

    /// Drop both messages and their pending timers.
    pub fn clear_messages(&mut self) {
        for slot in [Slot::Error, Slot::Success] {
            self.cancel_timer(slot);
            self.handle.write(slot, None);
        }
    }

    fn timer(&mut self, slot: Slot) -> &mut Option<AbortHandle> {
        match slot {
            Slot::Error => &mut self.error_timer,
            Slot::Success => &mut self.success_timer,
        }
    }

    fn cancel_timer(&mut self, slot: Slot) {
        if let Some(timer) = self.timer(slot).take() {
            timer.abort();
        }
    }

    fn set_message(&mut self, slot: Slot, text: String, clear_after: Duration) {
        self.cancel_timer(slot);
        let generation = self.handle.write(slot, Some(text));

        match Handle::try_current() {
            Ok(runtime) => {
                let handle = self.handle.clone();
                let task = runtime.spawn(async move {
                    sleep(clear_after).await;
                    handle.expire(slot, generation);
                });
                *self.timer(slot) = Some(task.abort_handle());
            }
            Err(_) => {
                tracing::warn!("No async runtime available; status message will not auto-clear");
            }
        }
    }
}

impl Drop for StatusTracker {
    fn drop(&mut self) {
        self.cancel_timer(Slot::Error);
        self.cancel_timer(Slot::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_SECS: Duration = Duration::from_millis(4000);
    const THREE_SECS: Duration = Duration::from_millis(3000);

    #[tokio::test(start_paused = true)]
    async fn test_error_clears_after_delay() {
        let mut tracker = StatusTracker::new();
        tracker.set_error("boom", FOUR_SECS);

        sleep(Duration::from_millis(3999)).await;
        assert_eq!(tracker.snapshot().error_text.as_deref(), Some("boom"));

        sleep(Duration::from_millis(2)).await;
        assert!(tracker.snapshot().error_text.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_clear_independently() {
        let mut tracker = StatusTracker::new();
        tracker.set_error("bad", FOUR_SECS);
        tracker.set_success("good", THREE_SECS);

        sleep(Duration::from_millis(3001)).await;
        let status = tracker.snapshot();
        assert!(status.success_text.is_none());
        assert_eq!(status.error_text.as_deref(), Some("bad"));

        sleep(Duration::from_millis(1000)).await;
        assert!(tracker.snapshot().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_message_outlives_old_deadline() {
        let mut tracker = StatusTracker::new();
        tracker.set_success("first", FOUR_SECS);

        sleep(Duration::from_millis(3000)).await;
        tracker.set_success("second", FOUR_SECS);

        // Past the first deadline, inside the second.
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(tracker.snapshot().success_text.as_deref(), Some("second"));

        sleep(Duration::from_millis(3000)).await;
        assert!(tracker.snapshot().success_text.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_expiry_is_ignored() {
        let tracker = StatusTracker::new();
        let handle = tracker.handle();

        let old = handle.write(Slot::Error, Some("old".to_string()));
        handle.write(Slot::Error, Some("new".to_string()));
        handle.expire(Slot::Error, old);

        assert_eq!(handle.snapshot().error_text.as_deref(), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_messages_cancels_timers() {
        let mut tracker = StatusTracker::new();
        tracker.set_error("bad", FOUR_SECS);
        tracker.clear_messages();
        assert!(tracker.snapshot().error_text.is_none());

        tracker.set_error("again", Duration::from_millis(10_000));
        sleep(Duration::from_millis(5000)).await;
        assert_eq!(tracker.snapshot().error_text.as_deref(), Some("again"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timers() {
        let mut tracker = StatusTracker::new();
        let handle = tracker.handle();
        tracker.set_error("bad", FOUR_SECS);

        drop(tracker);
        sleep(Duration::from_millis(5000)).await;

        assert_eq!(handle.snapshot().error_text.as_deref(), Some("bad"));
    }

    #[test]
    fn test_busy_guard() {
        let tracker = StatusTracker::new();
        assert!(!tracker.snapshot().busy);

        let guard = tracker.begin_busy();
        assert!(tracker.snapshot().busy);

        drop(guard);
        assert!(!tracker.snapshot().busy);
    }

    #[test]
    fn test_set_busy_has_no_auto_clear() {
        let tracker = StatusTracker::new();
        tracker.set_busy(true);
        assert!(tracker.snapshot().busy);
        tracker.set_busy(false);
        assert!(!tracker.snapshot().busy);
    }

    #[test]
    fn test_messages_without_runtime() {
        let mut tracker = StatusTracker::new();
        tracker.set_success("saved", FOUR_SECS);

        assert_eq!(tracker.snapshot().success_text.as_deref(), Some("saved"));
    }
}
