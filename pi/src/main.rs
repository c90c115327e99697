//! sysdash - system status pages on an SSD1306 OLED, paged by a touch sensor.
//!
//! Start-up failures (bad configuration, missing I2C bus or GPIO chip) are
//! reported with their context and exit non-zero. Once running, SIGINT and
//! SIGTERM stop the loop at the next tick boundary and exit 0; a second signal
//! exits 1 at once. A failing touch sensor exits 1.

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use sysdash_common::{PageCatalog, Scheduler};
use sysdash_pi::{signals, Cli, MonotonicClock, OledSurface, ProcMetrics, Settings, TouchSensor};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli).context("loading configuration")?;
    env_logger::Builder::from_env(Env::default().default_filter_or(settings.log_level.as_str())).init();

    // The loop polls the flag between ticks
    let shutdown = Arc::new(AtomicBool::new(false));
    signals::install(&shutdown).context("registering signal handlers")?;

    let pages = settings.page_ids()?;
    let catalog = PageCatalog::<ProcMetrics>::with_pages(&pages).context("building page catalog")?;
    let surface = OledSurface::open(&settings.i2c_bus, settings.display_address)?;
    let touch = TouchSensor::open(&settings.gpio_chip, settings.touch_line)?;

    info!("sysdash {} starting", env!("CARGO_PKG_VERSION"));
    let mut scheduler = Scheduler::new(
        &catalog,
        touch,
        surface,
        ProcMetrics::new(),
        MonotonicClock::new(),
        settings.timing(),
    )
    .context("starting loop")?;

    let reason = scheduler.run(&shutdown);
    Ok(ExitCode::from(reason.exit_code()))
}
