//! HUB75 RGB matrix driver (bit-banged)
//!
//! Drives a 32x16 HUB75 panel: two 1/8-scan halves sharing three row
//! address lines. The panel has no memory of its own, so it must be
//! rescanned continuously - [`Hub75::scan`] clocks one full frame out of
//! the shift registers and the panel task calls it in a loop.
//!
//! Color depth is one bit per channel (on if the channel is at least half
//! bright). The sign only ever draws white text on black, so no PWM
//! brightness ladder is needed.
//!
//! The drawing side is decoupled from the scanning side: the renderer
//! composes into a [`MatrixPanel`] off-screen buffer and `present` publishes
//! the finished frame to the shared [`FRAME`] that the scan loop reads.

use core::cell::RefCell;
use core::convert::Infallible;

use embassy_rp::gpio::{Level, Output};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{block_for, Duration};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::Pixel;

use chronotherm_core::traits::Panel;

/// Panel width in pixels
pub const PANEL_WIDTH: usize = 32;

/// Panel height in pixels
pub const PANEL_HEIGHT: usize = 16;

/// Rows driven per address (top and bottom half share an address)
const SCAN_ROWS: usize = PANEL_HEIGHT / 2;

/// How long each row pair stays lit per scan pass
const ROW_ON_TIME: Duration = Duration::from_micros(200);

/// One full frame of pixel data
pub type Frame = [[Rgb888; PANEL_WIDTH]; PANEL_HEIGHT];

const BLANK_FRAME: Frame = [[Rgb888::BLACK; PANEL_WIDTH]; PANEL_HEIGHT];

/// The frame currently on the glass, shared between the controller task
/// (writer, via [`MatrixPanel::present`]) and the panel task (reader)
pub static FRAME: Mutex<CriticalSectionRawMutex, RefCell<Frame>> =
    Mutex::new(RefCell::new(BLANK_FRAME));

/// GPIO assignment for the HUB75 connector
pub struct Hub75Pins {
    pub r1: Output<'static>,
    pub g1: Output<'static>,
    pub b1: Output<'static>,
    pub r2: Output<'static>,
    pub g2: Output<'static>,
    pub b2: Output<'static>,
    /// Row address lines A, B, C
    pub addr: [Output<'static>; 3],
    pub clk: Output<'static>,
    pub lat: Output<'static>,
    /// Output enable, active low
    pub oe: Output<'static>,
}

/// Bit-banged HUB75 scanner
pub struct Hub75 {
    pins: Hub75Pins,
}

impl Hub75 {
    pub fn new(mut pins: Hub75Pins) -> Self {
        // Start blanked with the latches in a known state
        pins.oe.set_high();
        pins.lat.set_low();
        pins.clk.set_low();
        Self { pins }
    }

    /// Clock one full frame out, row pair by row pair
    pub fn scan(&mut self, frame: &Frame) {
        let pins = &mut self.pins;

        for row in 0..SCAN_ROWS {
            for x in 0..PANEL_WIDTH {
                let top = frame[row][x];
                let bottom = frame[row + SCAN_ROWS][x];

                pins.r1.set_level(channel_level(top.r()));
                pins.g1.set_level(channel_level(top.g()));
                pins.b1.set_level(channel_level(top.b()));
                pins.r2.set_level(channel_level(bottom.r()));
                pins.g2.set_level(channel_level(bottom.g()));
                pins.b2.set_level(channel_level(bottom.b()));

                pins.clk.set_high();
                pins.clk.set_low();
            }

            // Blank while switching rows, then latch and relight
            pins.oe.set_high();
            for (bit, pin) in pins.addr.iter_mut().enumerate() {
                pin.set_level(Level::from((row >> bit) & 1 == 1));
            }
            pins.lat.set_high();
            pins.lat.set_low();
            pins.oe.set_low();

            block_for(ROW_ON_TIME);
        }

        // Blank between passes so the last row is not brighter than the rest
        pins.oe.set_high();
    }
}

/// One bit per channel: lit if at least half bright
fn channel_level(channel: u8) -> Level {
    Level::from(channel >= 0x80)
}

/// Off-screen frame buffer the renderer draws into
///
/// Implements the core's [`Panel`] trait: embedded-graphics drawing against
/// the local buffer, `present` publishing the finished frame to [`FRAME`].
pub struct MatrixPanel {
    frame: Frame,
}

impl MatrixPanel {
    pub fn new() -> Self {
        Self { frame: BLANK_FRAME }
    }
}

impl OriginDimensions for MatrixPanel {
    fn size(&self) -> Size {
        Size::new(PANEL_WIDTH as u32, PANEL_HEIGHT as u32)
    }
}

impl DrawTarget for MatrixPanel {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Clip instead of erroring: centered text may start off-panel
            if (0..PANEL_WIDTH as i32).contains(&point.x)
                && (0..PANEL_HEIGHT as i32).contains(&point.y)
            {
                self.frame[point.y as usize][point.x as usize] = color;
            }
        }
        Ok(())
    }
}

impl Panel for MatrixPanel {
    fn present(&mut self) -> Result<(), Self::Error> {
        FRAME.lock(|shared| {
            *shared.borrow_mut() = self.frame;
        });
        Ok(())
    }
}
