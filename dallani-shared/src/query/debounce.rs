//! Search debouncing.
//!
//! [`Debouncer`] decides *which* scheduled search may fire: it holds a single
//! pending slot, and every new schedule supersedes the previous one. The
//! actual waiting is done by a platform timer kept in a [`TimerSlot`], which
//! cancels the previous timer when a new one is stored.

use std::time::Duration;

/// Shortest accepted debounce delay.
pub const MIN_DEBOUNCE: Duration = Duration::from_millis(300);
/// Debounce delay used when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Handle of one scheduled search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    id: u64,
    /// How long to wait before calling [`Debouncer::fire`].
    pub delay: Duration,
}

/// Single-slot debounce state.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    issued: u64,
    pending: Option<u64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    /// Creates a debouncer; delays below [`MIN_DEBOUNCE`] are raised to it.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay: delay.max(MIN_DEBOUNCE),
            issued: 0,
            pending: None,
        }
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules a new firing, superseding any pending one.
    pub fn schedule(&mut self) -> DebounceTicket {
        self.issued += 1;
        self.pending = Some(self.issued);
        DebounceTicket {
            id: self.issued,
            delay: self.delay,
        }
    }

    /// Consumes the pending slot if `ticket` still owns it.
    pub fn fire(&mut self, ticket: DebounceTicket) -> bool {
        if self.pending == Some(ticket.id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// A running platform timer that can be stopped before it fires.
pub trait PendingTimer {
    fn cancel(self);
}

/// Holds at most one pending timer.
#[derive(Debug)]
pub struct TimerSlot<H: PendingTimer> {
    handle: Option<H>,
}

impl<H: PendingTimer> Default for TimerSlot<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H: PendingTimer> TimerSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handle`, cancelling the timer it replaces.
    pub fn replace(&mut self, handle: H) {
        if let Some(previous) = self.handle.replace(handle) {
            previous.cancel();
        }
    }

    pub fn clear(&mut self) {
        if let Some(previous) = self.handle.take() {
            previous.cancel();
        }
    }

    pub const fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl<H: PendingTimer> Drop for TimerSlot<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl PendingTimer for gloo_timers::callback::Timeout {
    fn cancel(self) {
        drop(gloo_timers::callback::Timeout::cancel(self));
    }
}

#[cfg(feature = "tokio")]
impl<T> PendingTimer for tokio::task::JoinHandle<T> {
    fn cancel(self) {
        self.abort();
    }
}
