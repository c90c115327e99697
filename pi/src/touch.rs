//! Capacitive touch sensor on a GPIO line.
//!
//! The sensor module drives its output HIGH while touched. The line is
//! requested as a plain input through the GPIO character device, so it is
//! freed by the kernel as soon as the handle is dropped.

use std::path::Path;

use anyhow::{Context, Result};
use embedded_hal::digital::InputPin;
use linux_embedded_hal::CdevPin;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use log::{debug, info};
use sysdash_common::InputPeripheral;
use sysdash_common::error::InputError;

/// Consumer label shown by `gpioinfo` for the requested line.
const CONSUMER: &str = "sysdash-touch";

/// The touch sensor input line.
pub struct TouchSensor {
    pin: Option<CdevPin>,
    line: u32,
}

impl TouchSensor {
    /// Request `line` of `chip` as an input.
    pub fn open(
        chip: &Path,
        line: u32,
    ) -> Result<Self> {
        let mut chip = Chip::new(chip).with_context(|| format!("opening GPIO chip {}", chip.display()))?;
        let handle = chip
            .get_line(line)
            .with_context(|| format!("getting touch line {line}"))?
            .request(LineRequestFlags::INPUT, 0, CONSUMER)
            .with_context(|| format!("requesting touch line {line}"))?;
        let pin = CdevPin::new(handle).context("creating touch pin")?;

        info!("touch sensor on line {line}");
        Ok(Self { pin: Some(pin), line })
    }
}

impl InputPeripheral for TouchSensor {
    fn read(&mut self) -> Result<bool, InputError> {
        let pin = self.pin.as_mut().ok_or(InputError::Disconnected)?;
        pin.is_high().map_err(|err| {
            debug!("touch line {} read failed: {err:?}", self.line);
            InputError::Io
        })
    }

    fn release(&mut self) {
        if self.pin.take().is_some() {
            info!("released touch line {}", self.line);
        }
    }
}
