//! Memory page: RAM and swap usage bars with totals.

use core::fmt::Write;

use heapless::String;

use super::{draw_bar, draw_line, draw_placeholder};
use crate::config::{BAR_HEIGHT, DENSE_LINE_HEIGHT};
use crate::error::RenderError;
use crate::format::format_size;
use crate::frame::Frame;
use crate::metrics::{MetricsProvider, Usage};
use crate::pages::PageId;
use crate::styles::DENSE_STYLE;

const RAM_Y: i32 = 0;
const SWAP_Y: i32 = 32;

// Bar plus two dense lines must fit in each half of the screen
const _: () = assert!(BAR_HEIGHT as i32 + 1 + 2 * DENSE_LINE_HEIGHT <= SWAP_Y - RAM_Y);
const _: () = assert!(SWAP_Y + BAR_HEIGHT as i32 + 1 + 2 * DENSE_LINE_HEIGHT <= 64);

/// Draw the memory page.
pub fn draw_memory_page<M: MetricsProvider>(
    frame: &mut Frame,
    metrics: &M,
) -> Result<(), RenderError> {
    let mem = match metrics.memory() {
        Ok(mem) => mem,
        Err(err) => {
            draw_placeholder(frame, PageId::Memory, err);
            return Ok(());
        }
    };

    draw_section(frame, RAM_Y, "RAM", &mem.ram);
    draw_section(frame, SWAP_Y, "Swap", &mem.swap);
    Ok(())
}

fn draw_section(
    frame: &mut Frame,
    y: i32,
    label: &str,
    usage: &Usage,
) {
    let percent = usage.percent();
    draw_bar(frame, y, BAR_HEIGHT, percent);

    let text_y = y + BAR_HEIGHT as i32 + 1;
    let mut s: String<32> = String::new();
    let _ = write!(s, "{label}: {percent:.1}%");
    draw_line(frame, 0, text_y, &s, DENSE_STYLE);

    s.clear();
    let _ = write!(s, "{} / {}", format_size(usage.used), format_size(usage.total));
    draw_line(frame, 0, text_y + DENSE_LINE_HEIGHT, &s, DENSE_STYLE);
}
