//! Render target trait for the LED matrix
//!
//! The panel is an opaque render target: the controller composes frames
//! with embedded-graphics and pushes each completed frame with
//! [`Panel::present`]. Pixel dimensions come from the blanket
//! [`Dimensions`](embedded_graphics::geometry::Dimensions) impl every draw
//! target carries, so centering needs nothing panel-specific.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb888;

/// A drawable LED matrix that displays nothing until a frame is presented
///
/// Drawing happens against an off-screen buffer; `present` pushes the
/// completed frame to the glass. Text drawn partially outside the visible
/// bounds is clipped by the target, never an error.
pub trait Panel: DrawTarget<Color = Rgb888> {
    /// Push the composed frame to the matrix
    fn present(&mut self) -> Result<(), Self::Error>;
}
