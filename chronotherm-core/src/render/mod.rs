//! Frame rendering
//!
//! One frame per tick: clear the buffer, format the active screen's text
//! (`HH:MM` for the clock, `<value>F` for temperature), center it inside
//! the panel bounds using the text's bounding box, present. Centering
//! offsets may go negative for text wider than the panel; the panel clips.

use core::fmt::Write as _;

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::mono_font::ascii::FONT_5X7;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use crate::state::{DisplayState, Screen};
use crate::time::TimeSnapshot;
use crate::traits::Panel;

/// Worst case is `<i32::MIN>F`: 12 characters
const TEXT_CAPACITY: usize = 16;

/// Top-left draw origin that centers a text box inside the panel.
///
/// Truncating division, matching the panel's integer pixel grid; a text box
/// larger than the panel yields a negative origin and the panel clips.
pub fn centered_origin(text: Size, panel: Size) -> Point {
    Point::new(
        (panel.width as i32 - text.width as i32) / 2,
        (panel.height as i32 - text.height as i32) / 2,
    )
}

/// Format the text for the active screen
pub fn screen_text(state: &DisplayState, now: TimeSnapshot) -> String<TEXT_CAPACITY> {
    let mut text = String::new();
    // Capacity covers both worst cases, so the writes cannot fail
    match state.screen() {
        Screen::Clock => {
            let _ = write!(text, "{:02}:{:02}", now.hours, now.minutes);
        }
        Screen::Temperature => {
            let _ = write!(text, "{}F", state.value());
        }
    }
    text
}

/// Renders the active screen centered on the matrix
pub struct Renderer {
    style: MonoTextStyle<'static, Rgb888>,
}

impl Renderer {
    /// White 5x7 text, the sign's one and only typeface
    pub fn new() -> Self {
        Self {
            style: MonoTextStyle::new(&FONT_5X7, Rgb888::WHITE),
        }
    }

    /// Compose and present one frame reflecting the current state
    pub fn render_frame<P: Panel>(
        &self,
        panel: &mut P,
        state: &DisplayState,
        now: TimeSnapshot,
    ) -> Result<(), P::Error> {
        panel.clear(Rgb888::BLACK)?;

        let text = screen_text(state, now);
        let metrics = self
            .style
            .measure_string(&text, Point::zero(), Baseline::Top);
        let origin = centered_origin(metrics.bounding_box.size, panel.bounding_box().size);
        Text::with_baseline(&text, origin, self.style, Baseline::Top).draw(panel)?;

        panel.present()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centering_formula() {
        // Known text box (w,h) in known bounds (W,H) -> ((W-w)/2, (H-h)/2)
        assert_eq!(
            centered_origin(Size::new(24, 8), Size::new(32, 16)),
            Point::new(4, 4)
        );
        assert_eq!(
            centered_origin(Size::new(5, 7), Size::new(32, 16)),
            Point::new(13, 4)
        );
    }

    #[test]
    fn test_centering_may_go_negative() {
        // Text wider than the panel: origin goes negative, panel clips
        assert_eq!(
            centered_origin(Size::new(40, 8), Size::new(32, 16)),
            Point::new(-4, 4)
        );
    }

    #[test]
    fn test_clock_text_zero_padded() {
        let state = DisplayState::new();
        let now = TimeSnapshot {
            hours: 7,
            minutes: 5,
        };
        assert_eq!(screen_text(&state, now).as_str(), "07:05");
    }

    #[test]
    fn test_clock_text_ignores_value() {
        let mut state = DisplayState::new();
        state.set_value(72);
        let now = TimeSnapshot {
            hours: 9,
            minutes: 41,
        };
        assert_eq!(screen_text(&state, now).as_str(), "09:41");
    }

    #[test]
    fn test_temperature_text() {
        let mut state = DisplayState::new();
        state.set_mode(1);
        state.set_value(72);
        assert_eq!(
            screen_text(&state, TimeSnapshot::default()).as_str(),
            "72F"
        );
    }

    #[test]
    fn test_temperature_text_negative() {
        let mut state = DisplayState::new();
        state.set_mode(1);
        state.set_value(-40);
        assert_eq!(
            screen_text(&state, TimeSnapshot::default()).as_str(),
            "-40F"
        );
    }

    #[test]
    fn test_unsynced_clock_renders_midnight() {
        let state = DisplayState::new();
        assert_eq!(
            screen_text(&state, TimeSnapshot::default()).as_str(),
            "00:00"
        );
    }
}
