use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of timestamps, in milliseconds. Only differences between readings mean anything.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Monotonic wall clock, counting from when it was created
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000.0
    }
}

/// A clock that only moves when told to. Clones share the same time, so a test can keep one
/// handle and give the other away.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod test {
    use super::Clock;
    use super::ManualClock;
    use super::SystemClock;

    #[test]
    fn manual_clones_share_time() {
        let clock = ManualClock::new(5.0);
        let other = clock.clone();

        clock.advance(10.0);
        assert_eq!(other.now_ms(), 15.0);

        other.set(1.0);
        assert_eq!(clock.now_ms(), 1.0);
    }

    #[test]
    fn system_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();

        assert!(b >= a);
    }
}
