//! Trailing debounce over an injected millisecond clock.
//!
//! The debouncer never reads a clock itself. Callers pass `now` to every
//! operation, and the browser layer arms a single timer for
//! [`Debouncer::deadline`]. Keeping time outside makes the commit schedule
//! deterministic under test.

/// Holds the latest pushed value until the input has been quiet for
/// `window_ms`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debouncer<T> {
    window_ms: u64,
    pending: Option<Pending<T>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Pending<T> {
    value: T,
    due_at: u64,
}

impl<T> Debouncer<T> {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    /// Record new input, superseding any pending value and restarting the window.
    pub fn push(&mut self, value: T, now: u64) {
        self.pending = Some(Pending {
            value,
            due_at: now.saturating_add(self.window_ms),
        });
    }

    /// Take the pending value if its quiescence window has elapsed.
    pub fn poll(&mut self, now: u64) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.due_at => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Take the pending value immediately, regardless of the window.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant the pending value becomes due.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.due_at)
    }

    /// Milliseconds until the pending value is due (0 if already due).
    pub fn remaining(&self, now: u64) -> Option<u64> {
        self.deadline().map(|due| due.saturating_sub(now))
    }
}

/// Holds the one armed timer for a pending commit.
///
/// Handles are expected to cancel on drop, as
/// `gloo_timers::callback::Timeout` does, so arming a new timer cancels the
/// previous one and [`TimerSlot::disarm`] cancels whatever is armed.
#[derive(Debug)]
pub struct TimerSlot<H> {
    armed: Option<H>,
}

impl<H> Default for TimerSlot<H> {
    fn default() -> Self {
        Self { armed: None }
    }
}

impl<H> TimerSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the armed timer, dropping the previous handle.
    pub fn arm(&mut self, handle: H) {
        self.armed = Some(handle);
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}
