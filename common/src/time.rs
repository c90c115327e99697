//! Monotonic timestamps and the clock interface.
//!
//! All timing decisions (debounce interval, page cycle timeout, tick pacing)
//! compare [`Timestamp`] values taken from a monotonic [`Clock`]. Counting
//! ticks would drift whenever a tick overruns, and wall-clock time jumps on
//! NTP adjustments.

use core::ops::Add;
use core::time::Duration;

/// A monotonic clock reading in microseconds since an arbitrary origin.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Debug, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The clock origin.
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from microseconds since the clock origin.
    #[inline]
    pub const fn from_micros(micros: u64) -> Self { Self(micros) }

    /// Create a timestamp from milliseconds since the clock origin.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self { Self(millis.saturating_mul(1_000)) }

    /// Create a timestamp from the elapsed time since the clock origin.
    #[inline]
    pub const fn from_duration(elapsed: Duration) -> Self {
        let micros = elapsed.as_micros();
        if micros > u64::MAX as u128 { Self(u64::MAX) } else { Self(micros as u64) }
    }

    /// Microseconds since the clock origin.
    #[inline]
    pub const fn as_micros(self) -> u64 { self.0 }

    /// Time elapsed from `earlier` to `self`, or zero if `earlier` is later.
    #[inline]
    pub const fn saturating_duration_since(
        self,
        earlier: Self,
    ) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(
        self,
        rhs: Duration,
    ) -> Self {
        self.0
            .checked_add(Self::from_duration(rhs).0)
            .map_or(Self(u64::MAX), Self)
    }
}

/// Source of monotonic time, and the way the loop waits between ticks.
pub trait Clock {
    /// Current monotonic time.
    fn now(&self) -> Timestamp;

    /// Block for `duration`.
    fn sleep(
        &mut self,
        duration: Duration,
    );
}
