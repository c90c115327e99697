//! Filesystem page: usage of each mounted block device.

use core::fmt::Write;

use heapless::String;

use super::{draw_line, draw_placeholder};
use crate::config::{DENSE_LINE_HEIGHT, SCREEN_HEIGHT};
use crate::error::RenderError;
use crate::format::format_size;
use crate::frame::Frame;
use crate::metrics::MetricsProvider;
use crate::pages::PageId;
use crate::styles::DENSE_STYLE;

/// Vertical space taken by one partition entry.
const ENTRY_HEIGHT: i32 = 3 * DENSE_LINE_HEIGHT + 2;

/// Partitions that fit on one screen.
const MAX_SHOWN: usize = (SCREEN_HEIGHT as i32 / ENTRY_HEIGHT) as usize;

/// Draw the filesystem page.
pub fn draw_filesystem_page<M: MetricsProvider>(
    frame: &mut Frame,
    metrics: &M,
) -> Result<(), RenderError> {
    let disks = match metrics.disks() {
        Ok(disks) => disks,
        Err(err) => {
            draw_placeholder(frame, PageId::Filesystem, err);
            return Ok(());
        }
    };

    if disks.is_empty() {
        draw_line(frame, 0, 0, "No partitions", DENSE_STYLE);
        return Ok(());
    }

    let mut s: String<48> = String::new();
    for (i, disk) in disks.iter().take(MAX_SHOWN).enumerate() {
        let y = i as i32 * ENTRY_HEIGHT;
        let name = disk.device.strip_prefix("/dev/").unwrap_or(&disk.device);

        s.clear();
        let _ = write!(s, "{name} {:.1}%", disk.percent());
        draw_line(frame, 0, y, &s, DENSE_STYLE);

        s.clear();
        let _ = write!(
            s,
            "{} of {}",
            format_size(disk.usage.used),
            format_size(disk.usage.total)
        );
        draw_line(frame, 0, y + DENSE_LINE_HEIGHT, &s, DENSE_STYLE);

        s.clear();
        let _ = write!(s, "{} free", format_size(disk.usage.free));
        draw_line(frame, 0, y + 2 * DENSE_LINE_HEIGHT, &s, DENSE_STYLE);
    }

    Ok(())
}
