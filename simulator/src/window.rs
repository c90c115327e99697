//! The simulator window as display surface and touch sensor.
//!
//! Both halves share one SDL window: the surface pushes committed frames to
//! it and the keyboard input drains its event queue. The space bar stands in
//! for the touch sensor (held = touched). Closing the window raises the
//! shutdown flag, which the loop sees at the next tick boundary.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{
    BinaryColorTheme,
    OutputSettingsBuilder,
    SimulatorDisplay,
    SimulatorEvent,
    Window,
};
use log::{debug, info};
use sysdash_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use sysdash_common::error::{InputError, SurfaceError};
use sysdash_common::{DisplaySurface, Frame, InputPeripheral};

/// Window pixels per OLED pixel.
const SCALE: u32 = 4;

/// Open the shared window, showing a blank panel.
pub fn open() -> (WindowSurface, KeyboardTouch) {
    let output_settings = OutputSettingsBuilder::new()
        .theme(BinaryColorTheme::OledBlue)
        .scale(SCALE)
        .build();
    let window = Rc::new(RefCell::new(Window::new("sysdash", &output_settings)));
    let display = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));

    // The window must be drawn once before its events can be polled
    window.borrow_mut().update(&display);

    (
        WindowSurface {
            window: Rc::clone(&window),
            display,
        },
        KeyboardTouch {
            window,
            held: false,
            shutdown: None,
        },
    )
}

// =============================================================================
// Surface
// =============================================================================

/// Draws committed frames into the window.
pub struct WindowSurface {
    window: Rc<RefCell<Window>>,
    display: SimulatorDisplay<BinaryColor>,
}

impl DisplaySurface for WindowSurface {
    fn commit(
        &mut self,
        frame: Frame,
    ) -> Result<(), SurfaceError> {
        self.display.draw_iter(frame.pixels()).ok();
        self.window.borrow_mut().update(&self.display);
        Ok(())
    }
}

// =============================================================================
// Touch Input
// =============================================================================

/// The space bar as the touch sensor.
pub struct KeyboardTouch {
    window: Rc<RefCell<Window>>,
    held: bool,
    shutdown: Option<Arc<AtomicBool>>,
}

impl KeyboardTouch {
    /// Raise `flag` when the window is closed or Escape is pressed.
    pub fn with_shutdown(
        mut self,
        flag: Arc<AtomicBool>,
    ) -> Self {
        self.shutdown = Some(flag);
        self
    }

    fn request_shutdown(&self) {
        if let Some(flag) = &self.shutdown {
            flag.store(true, Ordering::Relaxed);
        }
    }
}

impl InputPeripheral for KeyboardTouch {
    fn read(&mut self) -> Result<bool, InputError> {
        // A tap shorter than one tick still reads as touched once
        let mut touched = self.held;
        let mut quit = false;

        for event in self.window.borrow_mut().events() {
            match event {
                SimulatorEvent::Quit => quit = true,
                SimulatorEvent::KeyDown {
                    keycode, repeat: false, ..
                } => match keycode {
                    Keycode::Space => {
                        self.held = true;
                        touched = true;
                    }
                    Keycode::Escape => quit = true,
                    _ => {}
                },
                SimulatorEvent::KeyUp {
                    keycode: Keycode::Space,
                    ..
                } => self.held = false,
                _ => {}
            }
        }

        if quit {
            debug!("window closed");
            self.request_shutdown();
        }
        Ok(touched)
    }

    fn release(&mut self) {
        self.held = false;
        info!("keyboard input released");
    }
}
