//! Monotonic clock for the loop.

use std::thread;
use std::time::{Duration, Instant};

use sysdash_common::{Clock, Timestamp};

/// [`Clock`] counting from the moment it was created.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self { Self { origin: Instant::now() } }
}

impl Default for MonotonicClock {
    fn default() -> Self { Self::new() }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp { Timestamp::from_duration(self.origin.elapsed()) }

    fn sleep(
        &mut self,
        duration: Duration,
    ) {
        thread::sleep(duration);
    }
}
