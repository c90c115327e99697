//! Display surface interface.
//!
//! A surface hands out blank off-screen [`Frame`]s and later either commits
//! one to the panel or discards it. [`DisplaySurface::commit`] is the only
//! place pixels become visible, so a frame abandoned midway leaves the
//! previously committed frame on screen.

use crate::error::SurfaceError;
use crate::frame::Frame;

/// A display that shows whole committed frames.
pub trait DisplaySurface {
    /// Start composing a new frame.
    fn begin(&mut self) -> Frame { Frame::new() }

    /// Push a fully composed frame to the display.
    fn commit(
        &mut self,
        frame: Frame,
    ) -> Result<(), SurfaceError>;

    /// Abandon a frame without showing it.
    fn discard(
        &mut self,
        frame: Frame,
    ) {
        drop(frame);
    }
}
