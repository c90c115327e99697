//! Off-screen 1bpp framebuffer.
//!
//! Pages never draw to the display directly: they draw into a [`Frame`], and
//! only a committed frame reaches the panel. A frame dropped or discarded
//! half-drawn is simply never shown.
//!
//! Pixels are packed row-major, 8 pixels per byte, most significant bit first.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::{FRAME_BYTES, ROW_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH};

/// A full-screen monochrome frame.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; FRAME_BYTES],
}

impl Frame {
    /// Create a blank (all pixels off) frame.
    pub const fn new() -> Self { Self { buf: [0; FRAME_BYTES] } }

    /// Read a pixel. Out-of-bounds coordinates read as off.
    pub fn pixel(
        &self,
        x: u32,
        y: u32,
    ) -> bool {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return false;
        }
        let (idx, mask) = Self::locate(x, y);
        self.buf[idx] & mask != 0
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> u32 { self.buf.iter().map(|b| b.count_ones()).sum() }

    /// Whether no pixel is lit.
    pub fn is_blank(&self) -> bool { self.buf.iter().all(|b| *b == 0) }

    /// Raw packed buffer.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; FRAME_BYTES] { &self.buf }

    /// Iterate over every pixel of the frame, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        (0..SCREEN_HEIGHT).flat_map(move |y| {
            (0..SCREEN_WIDTH).map(move |x| {
                Pixel(Point::new(x as i32, y as i32), BinaryColor::from(self.pixel(x, y)))
            })
        })
    }

    fn set(
        &mut self,
        x: u32,
        y: u32,
        on: bool,
    ) {
        let (idx, mask) = Self::locate(x, y);
        if on {
            self.buf[idx] |= mask;
        } else {
            self.buf[idx] &= !mask;
        }
    }

    #[inline]
    const fn locate(
        x: u32,
        y: u32,
    ) -> (usize, u8) {
        let idx = y as usize * ROW_BYTES + (x / 8) as usize;
        (idx, 0x80 >> (x % 8))
    }
}

impl Default for Frame {
    fn default() -> Self { Self::new() }
}

impl core::fmt::Debug for Frame {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Frame").field("lit", &self.lit_count()).finish()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Clip silently: text and bars may run past the right edge
            if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y))
                && x < SCREEN_WIDTH
                && y < SCREEN_HEIGHT
            {
                self.set(x, y, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.buf.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    use super::*;

    #[test]
    fn test_new_frame_is_blank() {
        let frame = Frame::new();
        assert!(frame.is_blank());
        assert_eq!(frame.lit_count(), 0);
    }

    #[test]
    fn test_set_and_read_pixel() {
        let mut frame = Frame::new();
        Pixel(Point::new(9, 3), BinaryColor::On).draw(&mut frame).ok();
        assert!(frame.pixel(9, 3));
        assert!(!frame.pixel(8, 3));
        assert_eq!(frame.as_bytes()[3 * ROW_BYTES + 1], 0b0100_0000);
    }

    #[test]
    fn test_out_of_bounds_clipped() {
        let mut frame = Frame::new();
        Pixel(Point::new(-1, 0), BinaryColor::On).draw(&mut frame).ok();
        Pixel(Point::new(128, 0), BinaryColor::On).draw(&mut frame).ok();
        Pixel(Point::new(0, 64), BinaryColor::On).draw(&mut frame).ok();
        assert!(frame.is_blank());
        assert!(!frame.pixel(500, 500));
    }

    #[test]
    fn test_filled_rectangle() {
        let mut frame = Frame::new();
        Rectangle::new(Point::new(0, 0), Size::new(10, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .ok();
        assert_eq!(frame.lit_count(), 40);
    }

    #[test]
    fn test_clear() {
        let mut frame = Frame::new();
        frame.clear(BinaryColor::On).ok();
        assert_eq!(frame.lit_count(), SCREEN_WIDTH * SCREEN_HEIGHT);
        frame.clear(BinaryColor::Off).ok();
        assert!(frame.is_blank());
    }

    #[test]
    fn test_pixels_iterator_covers_screen() {
        let frame = Frame::new();
        assert_eq!(frame.pixels().count(), (SCREEN_WIDTH * SCREEN_HEIGHT) as usize);
    }
}
