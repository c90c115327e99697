//! The fixed-cadence tick loop.
//!
//! Each tick samples the touch sensor, debounces it, advances the page
//! selector and renders the selected page. The loop runs on one thread and
//! owns every piece of mutable state, so nothing here needs locking.
//!
//! ```text
//! Running ──(shutdown flag | input fault)──> Draining ──(release)──> Stopped
//! ```
//!
//! Shutdown is cooperative: the flag is checked only at tick boundaries, and
//! the input peripheral is released exactly once on the way out.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use log::{debug, error, info, warn};

use crate::config::Timing;
use crate::debounce::Debouncer;
use crate::error::{ConfigError, InputError};
use crate::metrics::MetricsProvider;
use crate::pages::{PageCatalog, PageId, PageSelector};
use crate::render::RenderDispatcher;
use crate::surface::DisplaySurface;
use crate::time::Clock;

// =============================================================================
// Collaborators
// =============================================================================

/// The touch sensor as seen by the loop.
pub trait InputPeripheral {
    /// Read the current level; `true` means touched.
    fn read(&mut self) -> Result<bool, InputError>;

    /// Give the underlying line back. Called once when the loop stops.
    fn release(&mut self);
}

// =============================================================================
// Loop State
// =============================================================================

/// Lifecycle of the loop.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoopState {
    Running,
    Draining,
    Stopped,
}

/// Why the loop stopped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExitReason {
    /// The shutdown flag was raised.
    Requested,
    /// The input peripheral failed.
    InputFault,
}

impl ExitReason {
    /// Process exit code for this reason.
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Requested => 0,
            Self::InputFault => 1,
        }
    }
}

/// Outcome of one tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TickReport {
    /// Page selected for this tick.
    pub page: PageId,
    /// A debounced press was seen.
    pub pressed: bool,
    /// The selected page differs from the previous tick.
    pub changed: bool,
    /// The page reached the display.
    pub rendered: bool,
}

/// Counters kept over the life of the loop.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct LoopStats {
    pub ticks: u64,
    pub presses: u64,
    pub page_changes: u64,
    pub render_failures: u64,
}

// =============================================================================
// Scheduler
// =============================================================================

/// Owns the loop state and its collaborators.
pub struct Scheduler<'c, I, S, M, C> {
    input: I,
    surface: S,
    metrics: M,
    clock: C,
    debouncer: Debouncer,
    selector: PageSelector,
    dispatcher: RenderDispatcher<'c, M>,
    tick_period: Duration,
    state: LoopState,
    exit: Option<ExitReason>,
    stats: LoopStats,
}

impl<'c, I, S, M, C> Scheduler<'c, I, S, M, C>
where
    I: InputPeripheral,
    S: DisplaySurface,
    M: MetricsProvider,
    C: Clock,
{
    /// Build a loop over `catalog`, seeding debounce and page timers at `clock.now()`.
    pub fn new(
        catalog: &'c PageCatalog<M>,
        input: I,
        surface: S,
        metrics: M,
        clock: C,
        timing: Timing,
    ) -> Result<Self, ConfigError> {
        timing.validate()?;
        let now = clock.now();
        let selector = PageSelector::new(catalog, now)?.with_cycle_interval(timing.page_cycle_interval);

        Ok(Self {
            input,
            surface,
            metrics,
            clock,
            debouncer: Debouncer::new(timing.min_press_interval, now),
            selector,
            dispatcher: RenderDispatcher::new(catalog),
            tick_period: timing.tick_period,
            state: LoopState::Running,
            exit: None,
            stats: LoopStats::default(),
        })
    }

    /// Run one sample → debounce → select → render pass.
    ///
    /// Render failures are logged and counted; only an input error fails the tick.
    pub fn tick(&mut self) -> Result<TickReport, InputError> {
        let raw = self.input.read()?;
        let now = self.clock.now();

        let press = self.debouncer.sample(raw, now);
        let previous = self.selector.current();
        let page = self.selector.on_tick(now, press);

        self.stats.ticks += 1;
        if press.is_some() {
            self.stats.presses += 1;
        }
        let changed = page != previous;
        if changed {
            self.stats.page_changes += 1;
            debug!("page {previous} -> {page}{}", if press.is_some() { " (press)" } else { "" });
        }

        let rendered = match self.dispatcher.dispatch(page, &mut self.surface, &self.metrics) {
            Ok(()) => true,
            Err(err) => {
                self.stats.render_failures += 1;
                warn!("render {page} failed: {err}");
                false
            }
        };

        Ok(TickReport {
            page,
            pressed: press.is_some(),
            changed,
            rendered,
        })
    }

    /// Tick at the configured cadence until `shutdown` is raised or input fails.
    ///
    /// Calling this again after the loop stopped returns the first exit reason
    /// without ticking.
    pub fn run(
        &mut self,
        shutdown: &AtomicBool,
    ) -> ExitReason {
        if let Some(reason) = self.exit {
            return reason;
        }
        info!(
            "loop starting: {} pages, tick {} ms",
            self.selector.len(),
            self.tick_period.as_millis()
        );

        let reason = loop {
            if shutdown.load(Ordering::Relaxed) {
                info!("shutdown requested");
                break ExitReason::Requested;
            }

            let tick_start = self.clock.now();
            if let Err(err) = self.tick() {
                error!("touch input failed: {err}");
                break ExitReason::InputFault;
            }

            // Pace against the tick start so a slow render does not add drift
            let deadline = tick_start + self.tick_period;
            let now = self.clock.now();
            if now < deadline {
                self.clock.sleep(deadline.saturating_duration_since(now));
            }
        };

        self.finish(reason)
    }

    fn finish(
        &mut self,
        reason: ExitReason,
    ) -> ExitReason {
        self.state = LoopState::Draining;
        self.input.release();
        self.exit = Some(reason);
        self.state = LoopState::Stopped;

        let stats = self.stats;
        info!(
            "loop stopped ({reason:?}): {} ticks, {} presses, {} page changes, {} render failures",
            stats.ticks, stats.presses, stats.page_changes, stats.render_failures
        );
        reason
    }

    #[inline]
    pub const fn state(&self) -> LoopState { self.state }

    #[inline]
    pub const fn stats(&self) -> LoopStats { self.stats }

    /// The page currently selected.
    pub fn current_page(&self) -> PageId { self.selector.current() }

    /// Why the loop stopped, once it has.
    #[inline]
    pub const fn exit_reason(&self) -> Option<ExitReason> { self.exit }

    #[inline]
    pub const fn input(&self) -> &I { &self.input }

    #[inline]
    pub const fn surface(&self) -> &S { &self.surface }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::error::SurfaceError;
    use crate::frame::Frame;
    use crate::screens::fixtures::{BrokenMetrics, FixedMetrics};
    use crate::time::Timestamp;

    struct ScriptedInput {
        samples: VecDeque<Result<bool, InputError>>,
        releases: u32,
    }

    impl ScriptedInput {
        fn new(samples: &[Result<bool, InputError>]) -> Self {
            Self {
                samples: samples.iter().copied().collect(),
                releases: 0,
            }
        }
    }

    impl InputPeripheral for ScriptedInput {
        fn read(&mut self) -> Result<bool, InputError> { self.samples.pop_front().unwrap_or(Ok(false)) }

        fn release(&mut self) { self.releases += 1; }
    }

    #[derive(Default)]
    struct CountingSurface {
        commits: u32,
        last: Option<Frame>,
    }

    impl DisplaySurface for CountingSurface {
        fn commit(
            &mut self,
            frame: Frame,
        ) -> Result<(), SurfaceError> {
            self.commits += 1;
            self.last = Some(frame);
            Ok(())
        }
    }

    /// Time only moves when the loop sleeps.
    struct SteppedClock {
        now: Timestamp,
        slept: Duration,
    }

    impl SteppedClock {
        fn new() -> Self {
            Self {
                now: Timestamp::ZERO,
                slept: Duration::ZERO,
            }
        }
    }

    impl Clock for SteppedClock {
        fn now(&self) -> Timestamp { self.now }

        fn sleep(
            &mut self,
            duration: Duration,
        ) {
            self.now = self.now + duration;
            self.slept += duration;
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitReason::Requested.exit_code(), 0);
        assert_eq!(ExitReason::InputFault.exit_code(), 1);
    }

    #[test]
    fn test_new_rejects_bad_timing() {
        let catalog = PageCatalog::<FixedMetrics>::standard();
        let timing = Timing {
            tick_period: Duration::ZERO,
            ..Timing::DEFAULT
        };
        let result = Scheduler::new(
            &catalog,
            ScriptedInput::new(&[]),
            CountingSurface::default(),
            FixedMetrics,
            SteppedClock::new(),
            timing,
        );
        assert!(matches!(result, Err(ConfigError::InvalidTiming(_))));
    }

    #[test]
    fn test_new_rejects_empty_catalog() {
        let catalog = PageCatalog::<FixedMetrics>::new();
        let result = Scheduler::new(
            &catalog,
            ScriptedInput::new(&[]),
            CountingSurface::default(),
            FixedMetrics,
            SteppedClock::new(),
            Timing::DEFAULT,
        );
        assert!(matches!(result, Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn test_tick_renders_first_page() {
        let catalog = PageCatalog::<FixedMetrics>::standard();
        let mut scheduler = Scheduler::new(
            &catalog,
            ScriptedInput::new(&[]),
            CountingSurface::default(),
            FixedMetrics,
            SteppedClock::new(),
            Timing::DEFAULT,
        )
        .unwrap();

        let report = scheduler.tick().unwrap();
        assert_eq!(report.page, PageId::Host);
        assert!(report.rendered);
        assert!(!report.pressed);
        assert!(!report.changed);
        assert_eq!(scheduler.surface().commits, 1);
        assert!(scheduler.surface().last.as_ref().is_some_and(|f| !f.is_blank()));
    }

    #[test]
    fn test_run_paces_ticks_to_period() {
        let catalog = PageCatalog::<FixedMetrics>::standard();
        let shutdown = AtomicBool::new(false);
        let mut scheduler = Scheduler::new(
            &catalog,
            ScriptedInput::new(&[Ok(false), Ok(false), Err(InputError::Disconnected)]),
            CountingSurface::default(),
            FixedMetrics,
            SteppedClock::new(),
            Timing::DEFAULT,
        )
        .unwrap();

        assert_eq!(scheduler.run(&shutdown), ExitReason::InputFault);
        assert_eq!(scheduler.stats().ticks, 2);
        assert_eq!(scheduler.clock.slept, Duration::from_millis(200));
    }

    #[test]
    fn test_run_after_stop_does_not_tick() {
        let catalog = PageCatalog::<FixedMetrics>::standard();
        let shutdown = AtomicBool::new(true);
        let mut scheduler = Scheduler::new(
            &catalog,
            ScriptedInput::new(&[]),
            CountingSurface::default(),
            FixedMetrics,
            SteppedClock::new(),
            Timing::DEFAULT,
        )
        .unwrap();

        assert_eq!(scheduler.run(&shutdown), ExitReason::Requested);
        shutdown.store(false, Ordering::Relaxed);
        assert_eq!(scheduler.run(&shutdown), ExitReason::Requested);
        assert_eq!(scheduler.stats().ticks, 0);
        assert_eq!(scheduler.input().releases, 1);
        assert_eq!(scheduler.state(), LoopState::Stopped);
    }

    #[test]
    fn test_broken_metrics_still_render() {
        let catalog = PageCatalog::<BrokenMetrics>::standard();
        let mut scheduler = Scheduler::new(
            &catalog,
            ScriptedInput::new(&[]),
            CountingSurface::default(),
            BrokenMetrics,
            SteppedClock::new(),
            Timing::DEFAULT,
        )
        .unwrap();

        let report = scheduler.tick().unwrap();
        assert!(report.rendered);
        assert_eq!(scheduler.stats().render_failures, 0);
    }
}
