//! Host identity page: name, address and uptime.

use core::fmt::Write;

use heapless::String;

use super::{draw_line, draw_placeholder};
use crate::config::LINE_HEIGHT;
use crate::error::RenderError;
use crate::format::format_uptime;
use crate::frame::Frame;
use crate::metrics::MetricsProvider;
use crate::pages::PageId;
use crate::styles::TEXT_STYLE;

/// Draw the host page.
pub fn draw_host_page<M: MetricsProvider>(
    frame: &mut Frame,
    metrics: &M,
) -> Result<(), RenderError> {
    let info = match metrics.host() {
        Ok(info) => info,
        Err(err) => {
            draw_placeholder(frame, PageId::Host, err);
            return Ok(());
        }
    };

    let mut s: String<48> = String::new();
    let _ = write!(s, "Host: {}", info.hostname);
    draw_line(frame, 0, 0, &s, TEXT_STYLE);

    s.clear();
    match info.ipv4 {
        Some(ip) => {
            let _ = write!(s, "Ip: {ip}");
        }
        None => {
            let _ = write!(s, "Ip: -");
        }
    }
    draw_line(frame, 0, LINE_HEIGHT, &s, TEXT_STYLE);

    s.clear();
    let _ = write!(s, "Uptime: {}", format_uptime(info.uptime));
    draw_line(frame, 0, 2 * LINE_HEIGHT, &s, TEXT_STYLE);

    Ok(())
}
