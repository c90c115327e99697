//! Page render dispatch.
//!
//! [`RenderDispatcher`] maps the selected [`PageId`] to its callback in the
//! [`PageCatalog`] and runs it inside a begin/commit scope on the surface:
//!
//! | Outcome | Surface call | Visible result |
//! |---------|--------------|----------------|
//! | Unknown page | none | Previous frame |
//! | Callback `Ok` | `commit` | New frame |
//! | Callback `Err` | `discard` | Previous frame |
//! | Commit fails | `commit` | Previous frame (driver dependent) |
//!
//! The dispatcher checks the catalog itself instead of trusting the
//! selector, so a misconfigured page id never reaches a callback.

use log::trace;

use crate::error::RenderError;
use crate::frame::Frame;
use crate::metrics::MetricsProvider;
use crate::pages::{PageCatalog, PageId};
use crate::surface::DisplaySurface;

/// A page render callback: draws one page into a blank frame.
pub type RenderFn<M> = fn(&mut Frame, &M) -> Result<(), RenderError>;

/// Runs page callbacks against a display surface.
pub struct RenderDispatcher<'c, M> {
    catalog: &'c PageCatalog<M>,
}

impl<'c, M: MetricsProvider> RenderDispatcher<'c, M> {
    /// Dispatch against `catalog`.
    pub const fn new(catalog: &'c PageCatalog<M>) -> Self { Self { catalog } }

    /// Render `page` and commit it to `surface`.
    ///
    /// Nothing reaches the display unless the callback completes.
    pub fn dispatch<S: DisplaySurface + ?Sized>(
        &self,
        page: PageId,
        surface: &mut S,
        metrics: &M,
    ) -> Result<(), RenderError> {
        let render = self.catalog.lookup(page).ok_or(RenderError::UnknownPage(page))?;

        let mut frame = surface.begin();
        if let Err(err) = render(&mut frame, metrics) {
            surface.discard(frame);
            return Err(err);
        }

        trace!("commit page {page}");
        surface.commit(frame)?;
        Ok(())
    }

    /// The catalog being dispatched against.
    #[inline]
    pub const fn catalog(&self) -> &'c PageCatalog<M> { self.catalog }
}

// =============================================================================
// Unit Tests
// =============================================================================
