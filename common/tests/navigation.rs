//! End-to-end navigation through the scheduler with a hand-driven clock.

mod support;

use std::time::Duration;

use support::{ManualClock, MockInput, MockSurface, NoMetrics, blank};
use sysdash_common::render::RenderFn;
use sysdash_common::{PageCatalog, PageId, Scheduler, Timing};

const BLANK: RenderFn<NoMetrics> = blank;

fn three_pages() -> PageCatalog<NoMetrics> {
    PageCatalog::<NoMetrics>::from_entries(&[(PageId::Host, BLANK), (PageId::Overview, BLANK), (PageId::Cpu, BLANK)])
        .unwrap()
}

fn timing() -> Timing {
    Timing {
        tick_period: Duration::from_millis(100),
        page_cycle_interval: Duration::from_secs(5),
        min_press_interval: Duration::from_millis(500),
    }
}

#[test]
fn test_press_and_timeout_scenario() {
    let catalog = three_pages();
    let clock = ManualClock::default();
    let input = MockInput::default();
    let mut scheduler =
        Scheduler::new(&catalog, input.clone(), MockSurface::default(), NoMetrics, clock.clone(), timing()).unwrap();

    let mut tick_at = |millis: u64, touched: bool| {
        clock.set_millis(millis);
        input.touch(touched);
        scheduler.tick().unwrap().page
    };

    assert_eq!(tick_at(0, false), PageId::Host);
    assert_eq!(tick_at(4_900, false), PageId::Host);
    assert_eq!(tick_at(5_000, false), PageId::Overview);

    // Touch, release at 5.1 s
    assert_eq!(tick_at(5_050, true), PageId::Overview);
    assert_eq!(tick_at(5_100, false), PageId::Cpu);

    // Second release 200 ms later is inside the press interval
    assert_eq!(tick_at(5_200, true), PageId::Cpu);
    assert_eq!(tick_at(5_300, false), PageId::Cpu);

    // The press reset the idle timer to 5.1 s
    assert_eq!(tick_at(10_000, false), PageId::Cpu);
    assert_eq!(tick_at(10_100, false), PageId::Host);
}

#[test]
fn test_timeout_only_cycles_with_catalog_period() {
    let catalog = three_pages();
    let clock = ManualClock::default();
    let mut scheduler = Scheduler::new(
        &catalog,
        MockInput::default(),
        MockSurface::default(),
        NoMetrics,
        clock.clone(),
        timing(),
    )
    .unwrap();

    let mut seen = Vec::new();
    for step in 0..=6u64 {
        clock.set_millis(step * 5_000);
        seen.push(scheduler.tick().unwrap().page);
    }
    assert_eq!(
        seen,
        [
            PageId::Host,
            PageId::Overview,
            PageId::Cpu,
            PageId::Host,
            PageId::Overview,
            PageId::Cpu,
            PageId::Host
        ]
    );
    assert_eq!(scheduler.stats().page_changes, 6);
}

#[test]
fn test_press_and_timeout_together_advance_once() {
    let catalog = three_pages();
    let clock = ManualClock::default();
    let input = MockInput::default();
    let mut scheduler =
        Scheduler::new(&catalog, input.clone(), MockSurface::default(), NoMetrics, clock.clone(), timing()).unwrap();

    scheduler.tick().unwrap();
    clock.set_millis(4_950);
    input.touch(true);
    scheduler.tick().unwrap();

    clock.set_millis(5_000);
    input.touch(false);
    let report = scheduler.tick().unwrap();
    assert!(report.pressed);
    assert_eq!(report.page, PageId::Overview);
    assert_eq!(scheduler.current_page(), PageId::Overview);
}

#[test]
fn test_held_finger_at_startup_is_not_a_press() {
    let catalog = three_pages();
    let clock = ManualClock::default();
    let input = MockInput::default();
    input.touch(true);
    let mut scheduler =
        Scheduler::new(&catalog, input.clone(), MockSurface::default(), NoMetrics, clock.clone(), timing()).unwrap();

    scheduler.tick().unwrap();
    clock.set_millis(100);
    input.touch(false);
    let report = scheduler.tick().unwrap();
    assert!(!report.pressed);
    assert_eq!(report.page, PageId::Host);
}
