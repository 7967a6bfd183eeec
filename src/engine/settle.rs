//! Settle timer: the single pending delay between a move and its follow-up.

use std::time::Duration;

/// A one-shot timer advanced by the caller's frame tick.
///
/// At most one deadline is pending at a time; scheduling again while pending
/// restarts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTimer {
    delay: Duration,
    elapsed: Option<Duration>,
}

impl SettleTimer {
    /// Create an idle timer firing `delay` after each [`schedule`](Self::schedule).
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            elapsed: None,
        }
    }

    /// The configured delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Start the countdown.
    pub fn schedule(&mut self) {
        self.elapsed = Some(Duration::ZERO);
    }

    /// Drop any pending deadline.
    pub fn reset(&mut self) {
        self.elapsed = None;
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Time left before the pending deadline fires.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.elapsed.map(|elapsed| self.delay.saturating_sub(elapsed))
    }

    /// Advance by `dt`. Returns `true` exactly once, on the tick the deadline
    /// is reached.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(elapsed) = self.elapsed else {
            return false;
        };

        let elapsed = elapsed.saturating_add(dt);
        if elapsed >= self.delay {
            self.elapsed = None;
            true
        } else {
            self.elapsed = Some(elapsed);
            false
        }
    }
}
