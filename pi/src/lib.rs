//! Raspberry Pi side of sysdash - the modules that can be tested on the host.
//!
//! The binary (`main.rs`) wires these to the hardware and runs the loop from
//! `sysdash-common`.
//!
//! - [`config`]: Command line, TOML settings and their validation
//! - [`procfs`]: Metrics read from `/proc`, sysfs and `statvfs`
//! - [`touch`]: The touch sensor on a GPIO character device line
//! - [`oled`]: The SSD1306 display on an I2C bus
//! - [`clock`]: Monotonic clock over `std::time::Instant`
//! - [`signals`]: SIGINT and SIGTERM handlers raising the shutdown flag
//!
//! # Testing
//!
//! ```bash
//! cargo test -p sysdash-pi
//! ```

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod clock;
pub mod config;
pub mod oled;
pub mod procfs;
pub mod signals;
pub mod touch;

pub use clock::MonotonicClock;
pub use config::{Cli, Settings, SettingsError};
pub use oled::OledSurface;
pub use procfs::ProcMetrics;
pub use touch::TouchSensor;
