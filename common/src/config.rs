//! Display layout constants and timing configuration.
//!
//! # Pre-computed Layout Constants
//!
//! Layout values like `SCREEN_WIDTH / 8` are computed at compile time as `const`,
//! so the screens never repeat that arithmetic per frame.

use core::time::Duration;

use crate::error::ConfigError;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (SSD1306 128x64)
pub const SCREEN_WIDTH: u32 = 128;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 64;

/// Bytes in one packed 1bpp frame.
pub const FRAME_BYTES: usize = (SCREEN_WIDTH * SCREEN_HEIGHT / 8) as usize;

/// Bytes per framebuffer row.
pub const ROW_BYTES: usize = (SCREEN_WIDTH / 8) as usize;

const _: () = assert!(SCREEN_WIDTH % 8 == 0);

// =============================================================================
// Page Layout
// =============================================================================

/// Vertical distance between text lines on the text pages.
pub const LINE_HEIGHT: i32 = 12;

/// Vertical distance between lines on the dense pages (CPU cores, filesystems).
pub const DENSE_LINE_HEIGHT: i32 = 9;

/// Height of a usage bar on the memory page.
pub const BAR_HEIGHT: u32 = 10;

/// Maximum number of pages in a catalog.
pub const MAX_PAGES: usize = 8;

/// Maximum number of CPU cores tracked in a metrics snapshot.
pub const MAX_CORES: usize = 16;

/// Maximum number of partitions tracked in a metrics snapshot.
pub const MAX_PARTITIONS: usize = 8;

// =============================================================================
// Timing Defaults
// =============================================================================

/// Default scheduler tick period.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Default idle time before the next page is shown automatically.
pub const PAGE_CYCLE_INTERVAL: Duration = Duration::from_secs(5);

/// Default minimum time between two accepted presses.
pub const MIN_PRESS_INTERVAL: Duration = Duration::from_millis(500);

const _: () = assert!(TICK_PERIOD.as_millis() < MIN_PRESS_INTERVAL.as_millis());
const _: () = assert!(MIN_PRESS_INTERVAL.as_millis() < PAGE_CYCLE_INTERVAL.as_millis());

/// Timing parameters of the scheduler loop.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Timing {
    /// Nominal time between two ticks.
    pub tick_period: Duration,
    /// Idle time after which the next page is shown.
    pub page_cycle_interval: Duration,
    /// Minimum time between two accepted presses.
    pub min_press_interval: Duration,
}

impl Timing {
    /// Default timing: 100 ms ticks, 5 s page cycle, 500 ms press interval.
    pub const DEFAULT: Self = Self {
        tick_period: TICK_PERIOD,
        page_cycle_interval: PAGE_CYCLE_INTERVAL,
        min_press_interval: MIN_PRESS_INTERVAL,
    };

    /// Reject timings the loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period.is_zero() {
            return Err(ConfigError::InvalidTiming("tick period must be non-zero"));
        }
        if self.page_cycle_interval.is_zero() {
            return Err(ConfigError::InvalidTiming("page cycle interval must be non-zero"));
        }
        Ok(())
    }
}

impl Default for Timing {
    fn default() -> Self { Self::DEFAULT }
}
