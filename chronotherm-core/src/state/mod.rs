//! Display state
//!
//! The one piece of long-lived mutable state in the system: which screen is
//! active and the last temperature reading. Created once at boot, mutated
//! only by request handling, read by the renderer.

use chronotherm_protocol::ScreenUpdate;

/// Which screen a mode value selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Current time as `HH:MM`
    Clock,
    /// Last received temperature as `<value>F`
    Temperature,
}

/// Shared display state: active screen mode and last temperature reading
///
/// The mode is a raw integer, not a closed enum: the wire has always
/// accepted any integer here, with 0 meaning the clock and every other
/// value the temperature screen. Out-of-range modes are stored and echoed
/// back verbatim. The temperature value is retained while the clock is
/// showing; switching back to the temperature screen shows the last
/// reading again (last-write-wins, no reset on mode switch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    mode: i32,
    value: i32,
}

impl DisplayState {
    /// Boot state: clock screen, temperature 0
    pub const fn new() -> Self {
        Self { mode: 0, value: 0 }
    }

    pub fn set_mode(&mut self, mode: i32) {
        self.mode = mode;
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    pub fn mode(&self) -> i32 {
        self.mode
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// The screen the current mode selects
    pub fn screen(&self) -> Screen {
        if self.mode == 0 {
            Screen::Clock
        } else {
            Screen::Temperature
        }
    }

    /// Apply a decoded update: mode first, then temperature, each only if
    /// the request carried it.
    pub fn apply(&mut self, update: ScreenUpdate) {
        if let Some(mode) = update.mode {
            self.set_mode(mode);
        }
        if let Some(temp) = update.temp {
            self.set_value(temp);
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_defaults() {
        let state = DisplayState::new();
        assert_eq!(state.mode(), 0);
        assert_eq!(state.value(), 0);
        assert_eq!(state.screen(), Screen::Clock);
    }

    #[test]
    fn test_apply_both_fields() {
        let mut state = DisplayState::new();
        state.apply(ScreenUpdate {
            mode: Some(1),
            temp: Some(72),
        });
        assert_eq!(state.mode(), 1);
        assert_eq!(state.value(), 72);
        assert_eq!(state.screen(), Screen::Temperature);
    }

    #[test]
    fn test_value_retained_across_mode_switch() {
        let mut state = DisplayState::new();
        state.apply(ScreenUpdate {
            mode: Some(1),
            temp: Some(72),
        });
        state.apply(ScreenUpdate {
            mode: Some(0),
            temp: None,
        });
        assert_eq!(state.screen(), Screen::Clock);
        assert_eq!(state.value(), 72);
    }

    #[test]
    fn test_any_nonzero_mode_selects_temperature() {
        let mut state = DisplayState::new();
        state.set_mode(-3);
        assert_eq!(state.screen(), Screen::Temperature);
        state.set_mode(42);
        assert_eq!(state.screen(), Screen::Temperature);
        // and the raw value is kept for the response
        assert_eq!(state.mode(), 42);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let update = ScreenUpdate {
            mode: Some(1),
            temp: Some(-5),
        };
        let mut state = DisplayState::new();
        state.apply(update);
        let first = state;
        state.apply(update);
        assert_eq!(state, first);
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let mut state = DisplayState::new();
        state.apply(ScreenUpdate {
            mode: Some(1),
            temp: Some(9),
        });
        let before = state;
        state.apply(ScreenUpdate::default());
        assert_eq!(state, before);
    }
}
