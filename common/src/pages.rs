//! Page catalog and navigation.
//!
//! The display rotates through a fixed, ordered set of pages. The catalog is
//! built once at start-up; its insertion order is the navigation order.
//! [`PageSelector`] holds the current position and advances it either on a
//! press or after [`PAGE_CYCLE_INTERVAL`](crate::config::PAGE_CYCLE_INTERVAL)
//! without one.
//!
//! # Pages
//!
//! - [`PageId::Host`]: Host name, IP address, uptime
//! - [`PageId::Overview`]: CPU usage, RAM and swap free/used
//! - [`PageId::Cpu`]: Per-core usage, total usage, frequency
//! - [`PageId::Memory`]: RAM and swap usage bars
//! - [`PageId::Filesystem`]: Per-partition disk usage

use core::fmt;
use core::time::Duration;

use heapless::Vec;

use crate::config::{MAX_PAGES, PAGE_CYCLE_INTERVAL};
use crate::debounce::PressEvent;
use crate::error::ConfigError;
use crate::metrics::MetricsProvider;
use crate::render::RenderFn;
use crate::screens;
use crate::time::Timestamp;

// =============================================================================
// Page Ids
// =============================================================================

/// Identifier of a page of system information.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PageId {
    /// Host name, IP address, uptime.
    Host,
    /// CPU usage, RAM and swap free/used.
    Overview,
    /// Per-core CPU usage and frequency.
    Cpu,
    /// RAM and swap usage bars.
    Memory,
    /// Per-partition filesystem usage.
    Filesystem,
}

impl PageId {
    /// All pages, in default navigation order.
    pub const ALL: [Self; 5] = [Self::Host, Self::Overview, Self::Cpu, Self::Memory, Self::Filesystem];

    /// Configuration name of the page.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Overview => "overview",
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Filesystem => "filesystem",
        }
    }

    /// Title shown by placeholders.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Host => "Host",
            Self::Overview => "Overview",
            Self::Cpu => "CPU",
            Self::Memory => "Memory",
            Self::Filesystem => "Filesystems",
        }
    }

    /// Look a page up by its configuration name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|page| page.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for PageId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Page Catalog
// =============================================================================

/// Ordered table of pages and their render callbacks.
pub struct PageCatalog<M> {
    entries: Vec<(PageId, RenderFn<M>), MAX_PAGES>,
}

impl<M: MetricsProvider> PageCatalog<M> {
    /// Create an empty catalog.
    pub const fn new() -> Self { Self { entries: Vec::new() } }

    /// Build a catalog from `(page, callback)` pairs in navigation order.
    pub fn from_entries(entries: &[(PageId, RenderFn<M>)]) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        for &(page, render) in entries {
            catalog.register(page, render)?;
        }
        Ok(catalog)
    }

    /// Build a catalog of the built-in screens for `pages`, in that order.
    pub fn with_pages(pages: &[PageId]) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        for &page in pages {
            catalog.register(page, screens::render_fn::<M>(page))?;
        }
        Ok(catalog)
    }

    /// All five built-in screens in default order.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for page in PageId::ALL {
            // Five distinct pages always fit in MAX_PAGES
            catalog.entries.push((page, screens::render_fn::<M>(page))).ok();
        }
        catalog
    }

    /// Append a page at the end of the navigation order.
    pub fn register(
        &mut self,
        page: PageId,
        render: RenderFn<M>,
    ) -> Result<(), ConfigError> {
        if self.contains(page) {
            return Err(ConfigError::DuplicatePage(page));
        }
        self.entries
            .push((page, render))
            .map_err(|_| ConfigError::TooManyPages { max: MAX_PAGES })
    }
}

impl<M> PageCatalog<M> {
    /// Render callback registered for `page`.
    pub fn lookup(
        &self,
        page: PageId,
    ) -> Option<RenderFn<M>> {
        self.entries.iter().find(|(id, _)| *id == page).map(|(_, render)| *render)
    }

    /// Whether `page` is registered.
    pub fn contains(
        &self,
        page: PageId,
    ) -> bool {
        self.entries.iter().any(|(id, _)| *id == page)
    }

    /// Page at navigation position `index`.
    pub fn page_at(
        &self,
        index: usize,
    ) -> Option<PageId> {
        self.entries.get(index).map(|(id, _)| *id)
    }

    /// Pages in navigation order.
    pub fn pages(&self) -> impl Iterator<Item = PageId> + '_ { self.entries.iter().map(|(id, _)| *id) }

    /// Number of registered pages.
    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether no page is registered.
    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl<M: MetricsProvider> Default for PageCatalog<M> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Page Selector
// =============================================================================

/// Current page and the rules for advancing it.
#[derive(Clone, Debug)]
pub struct PageSelector {
    order: Vec<PageId, MAX_PAGES>,
    current: usize,
    last_change: Timestamp,
    cycle_interval: Duration,
}

impl PageSelector {
    /// Start at the first page of `catalog`, with the idle timer starting at `now`.
    pub fn new<M>(
        catalog: &PageCatalog<M>,
        now: Timestamp,
    ) -> Result<Self, ConfigError> {
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let mut order = Vec::new();
        for page in catalog.pages() {
            // Catalog and selector share the same capacity
            order.push(page).map_err(|_| ConfigError::TooManyPages { max: MAX_PAGES })?;
        }
        Ok(Self {
            order,
            current: 0,
            last_change: now,
            cycle_interval: PAGE_CYCLE_INTERVAL,
        })
    }

    /// Use a different idle interval.
    #[must_use]
    pub fn with_cycle_interval(
        mut self,
        interval: Duration,
    ) -> Self {
        self.cycle_interval = interval;
        self
    }

    /// Advance on a press, or on idle timeout; returns the page to show.
    ///
    /// At most one advance happens per tick. A press always wins and resets
    /// the idle timer even when the timeout is also due.
    pub fn on_tick(
        &mut self,
        now: Timestamp,
        press: Option<PressEvent>,
    ) -> PageId {
        let timed_out = now.saturating_duration_since(self.last_change) >= self.cycle_interval;
        if press.is_some() || timed_out {
            self.current = (self.current + 1) % self.order.len();
            self.last_change = now;
        }
        self.current()
    }

    /// The page currently selected.
    pub fn current(&self) -> PageId {
        // current < order.len() and order is non-empty by construction
        self.order[self.current]
    }

    /// Navigation position of the current page.
    #[inline]
    pub const fn current_index(&self) -> usize { self.current }

    /// Time of the last page change (or start-up).
    #[inline]
    pub const fn last_change(&self) -> Timestamp { self.last_change }

    /// Number of pages in the rotation.
    #[inline]
    pub fn len(&self) -> usize { self.order.len() }

    /// Always false: a selector cannot be built over an empty catalog.
    #[inline]
    pub fn is_empty(&self) -> bool { self.order.is_empty() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use crate::error::{MetricsError, RenderError};
    use crate::metrics::{CpuStats, Disks, HostInfo, MemoryStats};

    struct NoMetrics;

    impl MetricsProvider for NoMetrics {
        fn host(&self) -> Result<HostInfo, MetricsError> { Err(MetricsError::Unavailable("host")) }

        fn cpu(&self) -> Result<CpuStats, MetricsError> { Err(MetricsError::Unavailable("cpu")) }

        fn memory(&self) -> Result<MemoryStats, MetricsError> { Err(MetricsError::Unavailable("memory")) }

        fn disks(&self) -> Result<Disks, MetricsError> { Err(MetricsError::Unavailable("disks")) }
    }

    fn noop(
        _: &mut Frame,
        _: &NoMetrics,
    ) -> Result<(), RenderError> {
        Ok(())
    }

    const NOOP: RenderFn<NoMetrics> = noop;

    fn ms(t: u64) -> Timestamp { Timestamp::from_millis(t) }

    fn press(t: u64) -> Option<PressEvent> { Some(PressEvent { at: ms(t) }) }

    fn three_pages() -> PageCatalog<NoMetrics> {
        PageCatalog::<NoMetrics>::from_entries(&[(PageId::Host, NOOP), (PageId::Cpu, NOOP), (PageId::Memory, NOOP)])
            .unwrap()
    }

    #[test]
    fn test_page_names_round_trip() {
        for page in PageId::ALL {
            assert_eq!(PageId::from_name(page.name()), Some(page));
        }
        assert_eq!(PageId::from_name(" CPU "), Some(PageId::Cpu));
        assert_eq!(PageId::from_name("network"), None);
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let result = PageCatalog::<NoMetrics>::from_entries(&[(PageId::Host, NOOP), (PageId::Host, NOOP)]);
        assert!(matches!(result, Err(ConfigError::DuplicatePage(PageId::Host))));
    }

    #[test]
    fn test_catalog_standard_order() {
        let catalog = PageCatalog::<NoMetrics>::standard();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.pages().eq(PageId::ALL));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = three_pages();
        assert!(catalog.lookup(PageId::Cpu).is_some());
        assert!(catalog.lookup(PageId::Filesystem).is_none());
        assert_eq!(catalog.page_at(2), Some(PageId::Memory));
        assert_eq!(catalog.page_at(3), None);
    }

    #[test]
    fn test_selector_empty_catalog() {
        let catalog = PageCatalog::<NoMetrics>::new();
        assert!(matches!(PageSelector::new(&catalog, ms(0)), Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn test_selector_starts_at_first_page() {
        let selector = PageSelector::new(&three_pages(), ms(0)).unwrap();
        assert_eq!(selector.current(), PageId::Host);
        assert_eq!(selector.current_index(), 0);
    }

    #[test]
    fn test_timeout_cycles_in_order() {
        let mut selector = PageSelector::new(&three_pages(), ms(0)).unwrap();
        let mut seen = std::vec::Vec::new();
        for t in (0..=30_000).step_by(100) {
            let before = selector.current_index();
            let page = selector.on_tick(ms(t), None);
            if selector.current_index() != before {
                seen.push(page);
            }
        }
        assert_eq!(seen, [
            PageId::Cpu,
            PageId::Memory,
            PageId::Host,
            PageId::Cpu,
            PageId::Memory,
            PageId::Host
        ]);
    }

    #[test]
    fn test_no_advance_before_timeout() {
        let mut selector = PageSelector::new(&three_pages(), ms(0)).unwrap();
        assert_eq!(selector.on_tick(ms(4_900), None), PageId::Host);
        assert_eq!(selector.on_tick(ms(5_000), None), PageId::Cpu);
        assert_eq!(selector.last_change(), ms(5_000));
    }

    #[test]
    fn test_press_advances_and_resets_timer() {
        let mut selector = PageSelector::new(&three_pages(), ms(0)).unwrap();
        assert_eq!(selector.on_tick(ms(3_000), press(3_000)), PageId::Cpu);
        // Timer restarted at 3 s, not at 0
        assert_eq!(selector.on_tick(ms(5_000), None), PageId::Cpu);
        assert_eq!(selector.on_tick(ms(8_000), None), PageId::Memory);
    }

    #[test]
    fn test_press_and_timeout_single_advance() {
        let mut selector = PageSelector::new(&three_pages(), ms(0)).unwrap();
        assert_eq!(selector.on_tick(ms(6_000), press(6_000)), PageId::Cpu);
        assert_eq!(selector.last_change(), ms(6_000));
    }

    #[test]
    fn test_custom_cycle_interval() {
        let mut selector = PageSelector::new(&three_pages(), ms(0))
            .unwrap()
            .with_cycle_interval(Duration::from_secs(1));
        assert_eq!(selector.on_tick(ms(1_000), None), PageId::Cpu);
    }

    #[test]
    fn test_single_page_wraps_to_itself() {
        let catalog = PageCatalog::<NoMetrics>::from_entries(&[(PageId::Memory, NOOP)]).unwrap();
        let mut selector = PageSelector::new(&catalog, ms(0)).unwrap();
        assert_eq!(selector.on_tick(ms(100), press(100)), PageId::Memory);
        assert_eq!(selector.current_index(), 0);
    }
}
