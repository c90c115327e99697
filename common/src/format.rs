//! Human-readable byte sizes and uptimes.
//!
//! Formatting goes into fixed-capacity `heapless` strings via
//! `core::fmt::Write`, so no allocation happens per frame.

use core::fmt::Write;
use core::time::Duration;

use heapless::String;

/// Capacity of a formatted size, e.g. `"1023.99 Bytes"`.
pub const SIZE_LENGTH: usize = 16;

/// Capacity of a formatted uptime, e.g. `"12345 days, 23:59:59"`.
pub const UPTIME_LENGTH: usize = 24;

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Format a byte count with binary prefixes and two decimals.
///
/// The value is divided by 1024 while it exceeds 1024 (so exactly 1024 stays
/// `"1024.00 Bytes"`), and never beyond terabytes.
pub fn format_size(bytes: u64) -> String<SIZE_LENGTH> {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size > 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let mut s = String::new();
    let _ = write!(s, "{size:.2} {}", UNITS[unit]);
    s
}

/// Format an uptime as `H:MM:SS`, with a leading day count once past a day.
pub fn format_uptime(uptime: Duration) -> String<UPTIME_LENGTH> {
    let total = uptime.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let mut s = String::new();
    match days {
        0 => {}
        1 => {
            let _ = write!(s, "1 day, ");
        }
        n => {
            let _ = write!(s, "{n} days, ");
        }
    }
    let _ = write!(s, "{hours}:{minutes:02}:{seconds:02}");
    s
}
