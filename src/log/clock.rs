//! Monotonic time sources for the step timer

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of monotonic instants
pub trait Clock {
    /// Current reading; never earlier than a previous reading
    fn now(&self) -> Instant;
}

/// The process monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
///
/// Useful for checking timer output without depending on how long the
/// surrounding code takes.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Cell<Duration>,
}

impl ManualClock {
    /// Start a clock frozen at the current instant
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
