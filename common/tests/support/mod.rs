//! Shared mock collaborators for the loop tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use sysdash_common::error::{InputError, MetricsError, RenderError, SurfaceError};
use sysdash_common::metrics::{CpuStats, Disks, HostInfo, MemoryStats};
use sysdash_common::{Clock, DisplaySurface, Frame, InputPeripheral, MetricsProvider, Timestamp};

/// Clock whose time is set by the test and advanced by `sleep`.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn set_millis(
        &self,
        millis: u64,
    ) {
        self.now.set(Timestamp::from_millis(millis));
    }

    pub fn now_millis(&self) -> u64 { self.now.get().as_micros() / 1_000 }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp { self.now.get() }

    fn sleep(
        &mut self,
        duration: Duration,
    ) {
        self.now.set(self.now.get() + duration);
    }
}

/// Touch sensor driven either by a level the test sets or by a script.
#[derive(Clone, Default)]
pub struct MockInput {
    level: Rc<Cell<bool>>,
    script: Rc<std::cell::RefCell<VecDeque<Result<bool, InputError>>>>,
    reads: Rc<Cell<u32>>,
    releases: Rc<Cell<u32>>,
    stop_after: Option<(u32, Arc<AtomicBool>)>,
}

impl MockInput {
    pub fn scripted(samples: &[Result<bool, InputError>]) -> Self {
        let input = Self::default();
        input.script.borrow_mut().extend(samples.iter().copied());
        input
    }

    /// Raise `flag` once `reads` samples have been taken.
    pub fn stopping_after(
        mut self,
        reads: u32,
        flag: Arc<AtomicBool>,
    ) -> Self {
        self.stop_after = Some((reads, flag));
        self
    }

    pub fn touch(
        &self,
        touched: bool,
    ) {
        self.level.set(touched);
    }

    pub fn reads(&self) -> u32 { self.reads.get() }

    pub fn releases(&self) -> u32 { self.releases.get() }
}

impl InputPeripheral for MockInput {
    fn read(&mut self) -> Result<bool, InputError> {
        self.reads.set(self.reads.get() + 1);
        if let Some((limit, flag)) = &self.stop_after
            && self.reads.get() >= *limit
        {
            flag.store(true, Ordering::Relaxed);
        }
        match self.script.borrow_mut().pop_front() {
            Some(sample) => sample,
            None => Ok(self.level.get()),
        }
    }

    fn release(&mut self) { self.releases.set(self.releases.get() + 1); }
}

/// Surface that keeps the last committed frame.
#[derive(Clone, Default)]
pub struct MockSurface {
    commits: Rc<Cell<u32>>,
    discards: Rc<Cell<u32>>,
    last: Rc<std::cell::RefCell<Option<Frame>>>,
}

impl MockSurface {
    pub fn commits(&self) -> u32 { self.commits.get() }

    pub fn discards(&self) -> u32 { self.discards.get() }

    pub fn last(&self) -> Option<Frame> { self.last.borrow().clone() }
}

impl DisplaySurface for MockSurface {
    fn commit(
        &mut self,
        frame: Frame,
    ) -> Result<(), SurfaceError> {
        self.commits.set(self.commits.get() + 1);
        *self.last.borrow_mut() = Some(frame);
        Ok(())
    }

    fn discard(
        &mut self,
        _frame: Frame,
    ) {
        self.discards.set(self.discards.get() + 1);
    }
}

/// Metrics source with nothing to report.
pub struct NoMetrics;

impl MetricsProvider for NoMetrics {
    fn host(&self) -> Result<HostInfo, MetricsError> { Err(MetricsError::Unavailable("host")) }

    fn cpu(&self) -> Result<CpuStats, MetricsError> { Err(MetricsError::Unavailable("cpu")) }

    fn memory(&self) -> Result<MemoryStats, MetricsError> { Err(MetricsError::Unavailable("memory")) }

    fn disks(&self) -> Result<Disks, MetricsError> { Err(MetricsError::Unavailable("disks")) }
}

pub fn blank(
    _frame: &mut Frame,
    _metrics: &NoMetrics,
) -> Result<(), RenderError> {
    Ok(())
}

pub fn failing(
    _frame: &mut Frame,
    _metrics: &NoMetrics,
) -> Result<(), RenderError> {
    Err(RenderError::Metrics(MetricsError::Unavailable("cpu")))
}
