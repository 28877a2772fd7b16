//! Time client backed by the SNTP sync task
//!
//! The sync task publishes each successful SNTP result through
//! [`TIME_SYNC`](crate::channels::TIME_SYNC); this client picks the latest
//! one up during its per-tick `update` and lets the core's `WallClock`
//! advance local time from there. Between syncs (and across sync failures)
//! time keeps moving on the monotonic clock.

use embassy_time::Instant;

use chronotherm_core::time::{TimeSnapshot, WallClock};
use chronotherm_core::traits::TimeClient;

use crate::channels::TIME_SYNC;

/// One successful sync: unix seconds and the local instant they were true
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncPoint {
    pub unix_s: u64,
    pub at: Instant,
}

/// [`TimeClient`] that follows the sync task's signal
pub struct NtpTimeClient {
    clock: WallClock,
    synced_at: Option<Instant>,
}

impl NtpTimeClient {
    pub fn new(utc_offset_s: i32) -> Self {
        Self {
            clock: WallClock::new(utc_offset_s),
            synced_at: None,
        }
    }
}

impl TimeClient for NtpTimeClient {
    fn update(&mut self) {
        // The sync task owns the refresh policy; all we do here is adopt
        // whatever it last published.
        if let Some(sync) = TIME_SYNC.try_take() {
            self.clock.set_unix_time(sync.unix_s);
            self.synced_at = Some(sync.at);
        }
    }

    fn now(&self) -> Option<TimeSnapshot> {
        let synced_at = self.synced_at?;
        self.clock.snapshot(synced_at.elapsed().as_secs())
    }
}
