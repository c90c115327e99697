//! Overview page: CPU usage, RAM and swap free/used.
//!
//! CPU and memory are queried separately, so one failing source only blanks
//! its own lines.

use core::fmt::Write;

use heapless::String;
use log::debug;

use super::draw_line;
use crate::config::LINE_HEIGHT;
use crate::error::RenderError;
use crate::format::format_size;
use crate::frame::Frame;
use crate::metrics::{MetricsProvider, Usage};
use crate::styles::TEXT_STYLE;

const CPU_Y: i32 = 0;
const RAM_Y: i32 = LINE_HEIGHT;
const SWAP_Y: i32 = 3 * LINE_HEIGHT - 2;
const SUB_LINE: i32 = LINE_HEIGHT - 2;

/// Draw the overview page.
pub fn draw_overview_page<M: MetricsProvider>(
    frame: &mut Frame,
    metrics: &M,
) -> Result<(), RenderError> {
    let mut s: String<32> = String::new();

    match metrics.cpu() {
        Ok(cpu) => {
            let _ = write!(s, "CPU Usage: {:.1}%", cpu.total_percent);
        }
        Err(err) => {
            debug!("overview cpu: {err}");
            let _ = write!(s, "CPU Usage: n/a");
        }
    }
    draw_line(frame, 0, CPU_Y, &s, TEXT_STYLE);

    match metrics.memory() {
        Ok(mem) => {
            draw_usage(frame, RAM_Y, "RAM", &mem.ram);
            draw_usage(frame, SWAP_Y, "Swap", &mem.swap);
        }
        Err(err) => {
            debug!("overview memory: {err}");
            draw_line(frame, 0, RAM_Y, "RAM: n/a", TEXT_STYLE);
            draw_line(frame, 0, SWAP_Y, "Swap: n/a", TEXT_STYLE);
        }
    }

    Ok(())
}

/// Two lines: free and used capacity.
fn draw_usage(
    frame: &mut Frame,
    y: i32,
    label: &str,
    usage: &Usage,
) {
    let mut s: String<32> = String::new();
    let _ = write!(s, "{label} Free: {}", format_size(usage.free));
    draw_line(frame, 0, y, &s, TEXT_STYLE);

    s.clear();
    let _ = write!(s, "{label} Used: {}", format_size(usage.used));
    draw_line(frame, 0, y + SUB_LINE, &s, TEXT_STYLE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::fixtures::FixedMetrics;

    #[test]
    fn test_layout_fits_screen() {
        assert!(SWAP_Y + SUB_LINE + LINE_HEIGHT <= 64);
    }

    #[test]
    fn test_overview_draws_all_sections() {
        let mut frame = Frame::new();
        draw_overview_page(&mut frame, &FixedMetrics).unwrap();
        // Something lit in the CPU row and in the swap rows
        assert!((0..128).any(|x| (0..8).any(|y| frame.pixel(x, y))));
        assert!((0..128).any(|x| (SWAP_Y as u32..SWAP_Y as u32 + 8).any(|y| frame.pixel(x, y))));
    }
}
