use std::time::Instant;

/// Time source for the monitoring loop, swappable in tests.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
