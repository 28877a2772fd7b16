//! Wall-clock bookkeeping
//!
//! The sign only ever needs hours and minutes of local time. A time client
//! (SNTP on real hardware) hands over unix time at each successful sync;
//! [`WallClock`] advances from that reference point using locally elapsed
//! seconds, applies the fixed UTC offset, and wraps modulo 24 hours.
//! Rendering must never fail on missing time data, so everything here
//! degrades to 00:00 rather than erroring.

use crate::traits::TimeClient;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Hours and minutes of local wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSnapshot {
    pub hours: u8,
    pub minutes: u8,
}

/// Local-time calculator anchored at the last sync
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    utc_offset_s: i32,
    base_unix: Option<u64>,
}

impl WallClock {
    /// Create a clock with a fixed UTC offset in seconds (e.g. `-5 * 3600`)
    pub const fn new(utc_offset_s: i32) -> Self {
        Self {
            utc_offset_s,
            base_unix: None,
        }
    }

    /// Record a successful sync: unix time as of "now"
    pub fn set_unix_time(&mut self, unix_s: u64) {
        self.base_unix = Some(unix_s);
    }

    /// True once at least one sync has landed
    pub fn is_synced(&self) -> bool {
        self.base_unix.is_some()
    }

    /// Local time `elapsed_s` seconds after the last sync.
    ///
    /// Before the first sync this returns `None`; callers that must show
    /// something fall back to 00:00.
    pub fn snapshot(&self, elapsed_s: u64) -> Option<TimeSnapshot> {
        let base = self.base_unix?;
        let local = (base as i64 + elapsed_s as i64 + i64::from(self.utc_offset_s))
            .rem_euclid(SECONDS_PER_DAY);
        Some(TimeSnapshot {
            hours: (local / SECONDS_PER_HOUR) as u8,
            minutes: (local % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
        })
    }
}

/// Time source the renderer reads each tick
///
/// Wraps the opaque time client: `tick()` gives the client a chance to
/// resync (the client owns its refresh interval and decides internally
/// whether to actually do anything), `snapshot()` returns the latest
/// resolved local time, 00:00 before the first successful sync.
pub struct TimeSource<T: TimeClient> {
    client: T,
}

impl<T: TimeClient> TimeSource<T> {
    pub fn new(client: T) -> Self {
        Self { client }
    }

    /// Advance the underlying client once per loop iteration
    pub fn tick(&mut self) {
        self.client.update();
    }

    /// Latest local time, zero-safe before the first sync
    pub fn snapshot(&self) -> TimeSnapshot {
        self.client.now().unwrap_or_default()
    }
}
