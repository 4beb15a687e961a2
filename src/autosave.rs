//! Autosave timers.
//!
//! Two shapes: a debounced save that re-arms on every edit and fires
//! after a quiet window, and a periodic full-store save. Both are
//! passive deadlines driven by caller-supplied instants,
//! not background threads; on flush a pending debounce is cancelled and
//! the save runs synchronously, so a save is never performed twice for
//! the same edit burst.

use std::time::{Duration, Instant};

/// Quiet window before a note autosave fires
pub const NOTE_DEBOUNCE: Duration = Duration::from_secs(2);

/// Interval between periodic full-store saves
pub const STORE_INTERVAL: Duration = Duration::from_secs(30);

/// Cancellable debounce deadline: each `poke` cancels and re-arms.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Record activity: cancel any pending deadline and schedule a new one
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Drop any pending deadline without firing
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when the deadline has passed; clears the deadline
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Cancel the pending deadline, reporting whether a save is owed.
    /// The caller performs the save synchronously.
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

/// Fixed-interval tick for the periodic store save
#[derive(Debug)]
pub struct PeriodicTimer {
    interval: Duration,
    next: Instant,
}

impl PeriodicTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    /// True when the interval has elapsed; re-arms from `now`
    pub fn tick(&mut self, now: Instant) -> bool {
        if now >= self.next {
            self.next = now + self.interval;
            true
        } else {
            false
        }
    }
}
