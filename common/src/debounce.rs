//! Touch sensor debounce handling.
//!
//! Converts the raw per-tick sensor level into discrete press events. A press
//! is the falling edge (touched → released) of the sensor output, accepted only
//! when at least the minimum press interval has passed since the last accepted
//! press. Contact bounce inside that window never yields a second press.
//!
//! # Seeding
//!
//! The debouncer starts from an explicit "not touched" sample and treats the
//! seeding instant as the last accepted press. The first call to
//! [`Debouncer::sample`] therefore cannot see a falling edge, and a finger that
//! was already on the sensor at start-up cannot trigger a press during the
//! first interval.

use core::time::Duration;

use crate::time::Timestamp;

/// A debounced touch-then-release of the sensor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PressEvent {
    /// Time of the release that produced this press.
    pub at: Timestamp,
}

/// Touch sensor debounce state with time-based falling edge detection.
#[derive(Clone, Debug)]
pub struct Debouncer {
    previous_sample: bool,
    last_accepted_press: Timestamp,
    min_interval: Duration,
}

impl Debouncer {
    /// Create a debouncer seeded at `now` with a released sensor.
    pub const fn new(
        min_interval: Duration,
        now: Timestamp,
    ) -> Self {
        Self {
            previous_sample: false,
            last_accepted_press: now,
            min_interval,
        }
    }

    /// Feed one raw sample taken at `now`.
    ///
    /// Returns a press only on a HIGH → LOW transition that is at least
    /// `min_interval` after the last accepted press.
    pub fn sample(
        &mut self,
        raw: bool,
        now: Timestamp,
    ) -> Option<PressEvent> {
        let falling_edge = self.previous_sample && !raw;
        self.previous_sample = raw;

        if !falling_edge {
            return None;
        }

        if now.saturating_duration_since(self.last_accepted_press) < self.min_interval {
            return None;
        }

        self.last_accepted_press = now;
        Some(PressEvent { at: now })
    }

    /// The most recent raw sample.
    #[inline]
    pub const fn previous_sample(&self) -> bool { self.previous_sample }

    /// Time of the last accepted press (or the seeding time).
    #[inline]
    pub const fn last_accepted_press(&self) -> Timestamp { self.last_accepted_press }
}

// =============================================================================
// Unit Tests
// =============================================================================
