//! CPU page: per-core load, total load and clock frequency.
//!
//! Cores are listed four to a column in the dense font. A second column is
//! used on boards with more than four cores; anything past eight is dropped.

use core::fmt::Write;

use heapless::String;

use super::{draw_line, draw_placeholder};
use crate::config::{DENSE_LINE_HEIGHT, LINE_HEIGHT};
use crate::error::RenderError;
use crate::frame::Frame;
use crate::metrics::MetricsProvider;
use crate::pages::PageId;
use crate::styles::{DENSE_STYLE, TEXT_STYLE};

const CORES_PER_COLUMN: usize = 4;
const MAX_SHOWN_CORES: usize = 2 * CORES_PER_COLUMN;
const SECOND_COLUMN_X: i32 = 64;
const TOTAL_Y: i32 = 38;
const FREQ_Y: i32 = TOTAL_Y + LINE_HEIGHT;

const _: () = assert!(CORES_PER_COLUMN as i32 * DENSE_LINE_HEIGHT <= TOTAL_Y);

/// Draw the CPU page.
pub fn draw_cpu_page<M: MetricsProvider>(
    frame: &mut Frame,
    metrics: &M,
) -> Result<(), RenderError> {
    let cpu = match metrics.cpu() {
        Ok(cpu) => cpu,
        Err(err) => {
            draw_placeholder(frame, PageId::Cpu, err);
            return Ok(());
        }
    };

    let two_columns = cpu.per_core.len() > CORES_PER_COLUMN;
    let mut s: String<24> = String::new();
    for (i, load) in cpu.per_core.iter().take(MAX_SHOWN_CORES).enumerate() {
        let column = (i / CORES_PER_COLUMN) as i32;
        let row = (i % CORES_PER_COLUMN) as i32;
        s.clear();
        if two_columns {
            let _ = write!(s, "C{} {:.0}%", i + 1, load);
        } else {
            let _ = write!(s, "Core {}: {:.1}%", i + 1, load);
        }
        draw_line(frame, column * SECOND_COLUMN_X, row * DENSE_LINE_HEIGHT, &s, DENSE_STYLE);
    }

    s.clear();
    let _ = write!(s, "Total: {:.1}%", cpu.total_percent);
    draw_line(frame, 0, TOTAL_Y, &s, TEXT_STYLE);

    s.clear();
    match cpu.frequency_mhz {
        Some(mhz) => {
            let _ = write!(s, "Freq: {mhz:.0} MHz");
        }
        None => {
            let _ = write!(s, "Freq: n/a");
        }
    }
    draw_line(frame, 0, FREQ_Y, &s, TEXT_STYLE);

    Ok(())
}
