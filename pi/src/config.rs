//! Start-up configuration.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Built-in defaults (Raspberry Pi wiring: `/dev/i2c-1`, OLED at `0x3C`,
//!    touch sensor on BCM line 12)
//! 2. An optional TOML file given with `--config`
//! 3. Command line flags
//!
//! ```toml
//! i2c_bus = "/dev/i2c-1"
//! display_address = 0x3C
//! gpio_chip = "/dev/gpiochip0"
//! touch_line = 12
//! tick_ms = 100
//! page_cycle_ms = 5000
//! min_press_ms = 500
//! pages = ["host", "overview", "cpu", "memory", "filesystem"]
//! log_level = "info"
//! ```

use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use sysdash_common::config::{MIN_PRESS_INTERVAL, PAGE_CYCLE_INTERVAL, TICK_PERIOD};
use sysdash_common::{ConfigError, PageId, Timing};
use thiserror::Error;

// =============================================================================
// Command Line
// =============================================================================

/// Show system status pages on an SSD1306 OLED, paged by a touch sensor.
#[derive(Parser, Debug, Default)]
#[command(name = "sysdash", version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// I2C bus device of the display
    #[arg(long)]
    pub i2c_bus: Option<PathBuf>,

    /// I2C address of the display (decimal or 0x-prefixed hex)
    #[arg(long, value_parser = parse_address)]
    pub display_address: Option<u8>,

    /// GPIO character device of the touch sensor
    #[arg(long)]
    pub gpio_chip: Option<PathBuf>,

    /// GPIO line offset of the touch sensor
    #[arg(long)]
    pub touch_line: Option<u32>,

    /// Tick period in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Idle time before the next page is shown, in milliseconds
    #[arg(long)]
    pub page_cycle_ms: Option<u64>,

    /// Minimum time between two accepted presses, in milliseconds
    #[arg(long)]
    pub min_press_ms: Option<u64>,

    /// Pages in navigation order, comma separated
    #[arg(long, value_delimiter = ',')]
    pub pages: Option<Vec<String>>,

    /// Log filter when RUST_LOG is not set
    #[arg(long)]
    pub log_level: Option<String>,
}

fn parse_address(value: &str) -> Result<u8, ParseIntError> {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("unknown page {0:?}")]
    UnknownPage(String),
    #[error("page {0} listed twice")]
    DuplicatePage(PageId),
    #[error("no pages configured")]
    NoPages,
    #[error(transparent)]
    Timing(#[from] ConfigError),
}

/// Resolved configuration of the `sysdash` binary.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub i2c_bus: PathBuf,
    pub display_address: u8,
    pub gpio_chip: PathBuf,
    pub touch_line: u32,
    pub tick_ms: u64,
    pub page_cycle_ms: u64,
    pub min_press_ms: u64,
    pub pages: Vec<String>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            i2c_bus: PathBuf::from("/dev/i2c-1"),
            display_address: 0x3C,
            gpio_chip: PathBuf::from("/dev/gpiochip0"),
            touch_line: 12,
            tick_ms: TICK_PERIOD.as_millis() as u64,
            page_cycle_ms: PAGE_CYCLE_INTERVAL.as_millis() as u64,
            min_press_ms: MIN_PRESS_INTERVAL.as_millis() as u64,
            pages: PageId::ALL.iter().map(|page| page.name().to_owned()).collect(),
            log_level: String::from("info"),
        }
    }
}

impl Settings {
    /// Defaults, overlaid with the file named by `--config`, overlaid with flags.
    pub fn resolve(cli: &Cli) -> Result<Self, SettingsError> {
        let mut settings = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply(cli);
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse settings from TOML text; missing keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> { Ok(toml::from_str(text)?) }

    /// Overlay the flags given on the command line.
    pub fn apply(
        &mut self,
        cli: &Cli,
    ) {
        if let Some(bus) = &cli.i2c_bus {
            self.i2c_bus.clone_from(bus);
        }
        if let Some(address) = cli.display_address {
            self.display_address = address;
        }
        if let Some(chip) = &cli.gpio_chip {
            self.gpio_chip.clone_from(chip);
        }
        if let Some(line) = cli.touch_line {
            self.touch_line = line;
        }
        if let Some(ms) = cli.tick_ms {
            self.tick_ms = ms;
        }
        if let Some(ms) = cli.page_cycle_ms {
            self.page_cycle_ms = ms;
        }
        if let Some(ms) = cli.min_press_ms {
            self.min_press_ms = ms;
        }
        if let Some(pages) = &cli.pages {
            self.pages.clone_from(pages);
        }
        if let Some(level) = &cli.log_level {
            self.log_level.clone_from(level);
        }
    }

    /// Check timing and page names.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.timing().validate()?;
        self.page_ids()?;
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            tick_period: Duration::from_millis(self.tick_ms),
            page_cycle_interval: Duration::from_millis(self.page_cycle_ms),
            min_press_interval: Duration::from_millis(self.min_press_ms),
        }
    }

    /// The configured pages in navigation order.
    pub fn page_ids(&self) -> Result<Vec<PageId>, SettingsError> {
        if self.pages.is_empty() {
            return Err(SettingsError::NoPages);
        }
        let mut ids = Vec::with_capacity(self.pages.len());
        for name in &self.pages {
            let page = PageId::from_name(name).ok_or_else(|| SettingsError::UnknownPage(name.clone()))?;
            if ids.contains(&page) {
                return Err(SettingsError::DuplicatePage(page));
            }
            ids.push(page);
        }
        Ok(ids)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
