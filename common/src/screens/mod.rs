//! The system information pages.
//!
//! Every page is a plain function matching [`RenderFn`]: it draws into a blank
//! [`Frame`] from one metrics snapshot. A failed metrics query is drawn as a
//! visible placeholder; pages never return the metrics error.

mod cpu;
mod filesystem;
mod host;
mod memory;
mod overview;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use log::debug;

pub use cpu::draw_cpu_page;
pub use filesystem::draw_filesystem_page;
pub use host::draw_host_page;
pub use memory::draw_memory_page;
pub use overview::draw_overview_page;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::MetricsError;
use crate::frame::Frame;
use crate::metrics::MetricsProvider;
use crate::pages::PageId;
use crate::render::RenderFn;
use crate::styles::{BAR_FILL, BAR_OUTLINE, CENTERED, TEXT_STYLE, TOP_LEFT};

const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;
const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

/// Built-in render callback for `page`.
pub fn render_fn<M: MetricsProvider>(page: PageId) -> RenderFn<M> {
    match page {
        PageId::Host => draw_host_page::<M>,
        PageId::Overview => draw_overview_page::<M>,
        PageId::Cpu => draw_cpu_page::<M>,
        PageId::Memory => draw_memory_page::<M>,
        PageId::Filesystem => draw_filesystem_page::<M>,
    }
}

/// Draw the "unavailable" placeholder for a whole page.
pub fn draw_placeholder(
    frame: &mut Frame,
    page: PageId,
    err: MetricsError,
) {
    debug!("{page} page placeholder: {err}");
    Text::with_text_style(page.title(), Point::new(CENTER_X, CENTER_Y - 6), TEXT_STYLE, CENTERED)
        .draw(frame)
        .ok();
    Text::with_text_style("unavailable", Point::new(CENTER_X, CENTER_Y + 6), TEXT_STYLE, CENTERED)
        .draw(frame)
        .ok();
}

/// Draw one line of text with its top-left corner at `(x, y)`.
fn draw_line(
    frame: &mut Frame,
    x: i32,
    y: i32,
    text: &str,
    style: MonoTextStyle<'static, BinaryColor>,
) {
    Text::with_text_style(text, Point::new(x, y), style, TOP_LEFT)
        .draw(frame)
        .ok();
}

/// Width in pixels of a bar showing `percent` of the screen width.
fn bar_width(percent: f32) -> u32 {
    let clamped = percent.clamp(0.0, 100.0);
    (clamped / 100.0 * SCREEN_WIDTH as f32) as u32
}

/// Draw a full-width usage bar filled to `percent`.
fn draw_bar(
    frame: &mut Frame,
    y: i32,
    height: u32,
    percent: f32,
) {
    Rectangle::new(Point::new(0, y), Size::new(SCREEN_WIDTH, height))
        .into_styled(BAR_OUTLINE)
        .draw(frame)
        .ok();
    let width = bar_width(percent);
    if width > 0 {
        Rectangle::new(Point::new(0, y), Size::new(width, height))
            .into_styled(BAR_FILL)
            .draw(frame)
            .ok();
    }
}
