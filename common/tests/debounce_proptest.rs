//! Property-based tests for touch debouncing.
//! Accepted presses hold for every sample stream, not just hand-picked ones.

use std::time::Duration;

use proptest::prelude::*;
use sysdash_common::{Debouncer, Timestamp};

const MIN_INTERVAL: Duration = Duration::from_millis(500);

fn stream() -> impl Strategy<Value = Vec<(bool, u64)>> {
    // (level, milliseconds since the previous sample)
    proptest::collection::vec((any::<bool>(), 0u64..400), 0..200)
}

proptest! {
    /// Every press is a falling edge and presses are at least the minimum interval apart.
    #[test]
    fn presses_are_spaced_falling_edges(samples in stream()) {
        let mut debouncer = Debouncer::new(MIN_INTERVAL, Timestamp::ZERO);
        let mut now = 0u64;
        let mut previous = false;
        let mut last_press = 0u64;

        for (level, delta) in samples {
            now += delta;
            let press = debouncer.sample(level, Timestamp::from_millis(now));
            if let Some(press) = press {
                prop_assert!(previous && !level, "press without falling edge at {} ms", now);
                prop_assert!(now - last_press >= 500, "presses {} ms apart", now - last_press);
                prop_assert_eq!(press.at, Timestamp::from_millis(now));
                last_press = now;
            }
            previous = level;
        }
    }

    /// A falling edge past the interval is never dropped.
    #[test]
    fn spaced_edges_are_accepted(gaps in proptest::collection::vec(500u64..5_000, 1..20)) {
        let mut debouncer = Debouncer::new(MIN_INTERVAL, Timestamp::ZERO);
        let mut now = 0u64;
        for gap in gaps {
            now += gap;
            prop_assert!(debouncer.sample(true, Timestamp::from_millis(now - 1)).is_none());
            prop_assert!(debouncer.sample(false, Timestamp::from_millis(now)).is_some());
        }
    }

    /// The first sample never produces a press.
    #[test]
    fn first_sample_is_silent(level in any::<bool>(), at in 0u64..1_000_000) {
        let mut debouncer = Debouncer::new(MIN_INTERVAL, Timestamp::ZERO);
        prop_assert!(debouncer.sample(level, Timestamp::from_millis(at)).is_none());
    }
}
