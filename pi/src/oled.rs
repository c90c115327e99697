//! SSD1306 128x64 OLED on an I2C bus.
//!
//! The driver runs in buffered graphics mode: a committed [`Frame`] is copied
//! into the driver buffer and flushed in one transfer.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use embedded_graphics::prelude::*;
use linux_embedded_hal::I2cdev;
use log::{debug, info};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};
use sysdash_common::error::SurfaceError;
use sysdash_common::{DisplaySurface, Frame};

type Driver = Ssd1306<I2CInterface<I2cdev>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// The OLED as a [`DisplaySurface`].
pub struct OledSurface {
    display: Driver,
}

impl OledSurface {
    /// Open `bus`, initialise the controller at `address` and blank the panel.
    pub fn open(
        bus: &Path,
        address: u8,
    ) -> Result<Self> {
        let i2c = I2cdev::new(bus).with_context(|| format!("opening I2C bus {}", bus.display()))?;
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let mut display =
            Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0).into_buffered_graphics_mode();
        display
            .init()
            .map_err(|err| anyhow!("display init at {address:#04x} failed: {err:?}"))?;
        display.clear_buffer();
        display.flush().map_err(|err| anyhow!("display flush failed: {err:?}"))?;

        info!("display at {address:#04x} on {}", bus.display());
        Ok(Self { display })
    }
}

impl DisplaySurface for OledSurface {
    fn commit(
        &mut self,
        frame: Frame,
    ) -> Result<(), SurfaceError> {
        // Every pixel is written, so the previous buffer needs no clearing
        self.display.draw_iter(frame.pixels()).map_err(|err| {
            debug!("display draw failed: {err:?}");
            SurfaceError::Bus
        })?;
        self.display.flush().map_err(|err| {
            debug!("display flush failed: {err:?}");
            SurfaceError::Bus
        })
    }
}
