//! Core logic for the sysdash OLED status display.
//!
//! This crate contains the platform-agnostic code shared between the
//! Raspberry Pi binary and the desktop simulator:
//!
//! - [`debounce`]: Touch sensor debouncing into discrete press events
//! - [`pages`]: Page ids, the page catalog and the navigation state machine
//! - [`render`]: Dispatch of the current page to its render callback
//! - [`scheduler`]: The fixed-cadence tick loop with cooperative shutdown
//! - [`screens`]: The five system information pages
//! - [`metrics`]: Metrics provider interface and snapshot types
//! - [`surface`]: Display surface interface
//! - [`frame`]: 1bpp off-screen framebuffer that pages draw into
//! - [`format`]: Human-readable byte sizes and uptimes
//! - [`config`]: Layout constants and timing configuration
//! - [`time`]: Monotonic timestamps and the clock interface
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` and allocation-free. All timing goes through
//! [`time::Timestamp`], so it never depends on `std::time`.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p sysdash-common
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod debounce;
pub mod error;
pub mod format;
pub mod frame;
pub mod metrics;
pub mod pages;
pub mod render;
pub mod scheduler;
pub mod screens;
pub mod styles;
pub mod surface;
pub mod time;

// Re-export commonly used items
pub use config::Timing;
pub use debounce::{Debouncer, PressEvent};
pub use error::{ConfigError, InputError, MetricsError, RenderError, SurfaceError};
pub use frame::Frame;
pub use metrics::MetricsProvider;
pub use pages::{PageCatalog, PageId, PageSelector};
pub use render::RenderDispatcher;
pub use scheduler::{ExitReason, InputPeripheral, LoopState, Scheduler};
pub use surface::DisplaySurface;
pub use time::{Clock, Timestamp};
