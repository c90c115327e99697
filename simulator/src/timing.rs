//! Wall-time clock for the simulator.
//!
//! Uses `std::time::Instant`, which is not available to the `no_std` common
//! crate, so the clock lives here.

use std::thread;
use std::time::{Duration, Instant};

use sysdash_common::{Clock, Timestamp};

/// [`Clock`] counting from simulator start.
pub struct SimClock {
    origin: Instant,
}

impl SimClock {
    pub fn new() -> Self { Self { origin: Instant::now() } }
}

impl Clock for SimClock {
    fn now(&self) -> Timestamp { Timestamp::from_duration(self.origin.elapsed()) }

    fn sleep(
        &mut self,
        duration: Duration,
    ) {
        thread::sleep(duration);
    }
}

impl Default for SimClock {
    fn default() -> Self { Self::new() }
}
