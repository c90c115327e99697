//! Error taxonomy.
//!
//! | Error | Where | Handling |
//! |-------|-------|----------|
//! | [`ConfigError`] | Construction | Fatal, aborts start-up |
//! | [`InputError`] | Touch sensor read | Fatal, loop drains and stops |
//! | [`SurfaceError`] | Display commit | Logged, frame skipped |
//! | [`MetricsError`] | Metrics query | Rendered as a placeholder |
//! | [`RenderError`] | Page dispatch | Logged, frame skipped |

use thiserror::Error;

use crate::pages::PageId;

/// Invalid start-up configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum ConfigError {
    /// The page catalog has no entries.
    #[error("page catalog is empty")]
    EmptyCatalog,
    /// More pages than the catalog can hold.
    #[error("page catalog holds at most {max} pages")]
    TooManyPages {
        /// Catalog capacity.
        max: usize,
    },
    /// The same page was registered twice.
    #[error("page {0} registered twice")]
    DuplicatePage(PageId),
    /// A timing value is out of range.
    #[error("invalid timing: {0}")]
    InvalidTiming(&'static str),
}

/// Failure to read the touch sensor.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum InputError {
    /// The read itself failed.
    #[error("input read failed")]
    Io,
    /// The input line is gone (released or unplugged).
    #[error("input peripheral disconnected")]
    Disconnected,
}

/// Failure to push a frame to the display.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum SurfaceError {
    /// Bus transfer to the display failed.
    #[error("display bus error")]
    Bus,
    /// The display controller is not initialised.
    #[error("display not initialised")]
    Init,
}

/// Failure to query a system metric.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum MetricsError {
    /// The OS source for this metric could not be read.
    #[error("{0} unavailable")]
    Unavailable(&'static str),
    /// The OS source was read but could not be parsed.
    #[error("{0} malformed")]
    Malformed(&'static str),
}

/// Failure to render a page.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum RenderError {
    /// No callback is registered for the page.
    #[error("no render callback for page {0}")]
    UnknownPage(PageId),
    /// A page gave up because of a metrics failure.
    #[error("metrics: {0}")]
    Metrics(#[from] MetricsError),
    /// The composed frame could not be committed.
    #[error("surface: {0}")]
    Surface(#[from] SurfaceError),
}
