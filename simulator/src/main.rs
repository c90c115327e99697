//! sysdash simulator for desktop platforms.
//!
//! Runs the same loop and pages as the Raspberry Pi binary, rendered into an
//! `embedded-graphics-simulator` window with synthetic metrics.
//!
//! Controls: hold and release SPACE to touch, ESC or close the window to quit.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

mod demo;
mod timing;
mod window;

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use env_logger::Env;
use log::error;
use sysdash_common::{PageCatalog, Scheduler, Timing};

use crate::demo::DemoMetrics;
use crate::timing::SimClock;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();

    let shutdown = Arc::new(AtomicBool::new(false));
    let (surface, touch) = window::open();
    let touch = touch.with_shutdown(Arc::clone(&shutdown));

    let catalog = PageCatalog::<DemoMetrics>::standard();
    let mut scheduler = match Scheduler::new(
        &catalog,
        touch,
        surface,
        DemoMetrics::new(),
        SimClock::new(),
        Timing::DEFAULT,
    ) {
        Ok(scheduler) => scheduler,
        Err(err) => {
            error!("cannot start: {err}");
            return ExitCode::FAILURE;
        }
    };

    ExitCode::from(scheduler.run(&shutdown).exit_code())
}
