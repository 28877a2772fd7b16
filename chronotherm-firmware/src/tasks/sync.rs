//! Time synchronization task
//!
//! Contacts the time authority on a fixed interval and publishes each
//! successful result. The controller's time client adopts the latest
//! published sync on its next tick; a failed round just leaves the sign
//! running on the previous one.

use defmt::*;
use embassy_net::Stack;
use embassy_time::{Instant, Timer};

use chronotherm_core::config::TimeConfig;

use crate::channels::TIME_SYNC;
use crate::sntp;
use crate::time::SyncPoint;

/// Periodic SNTP sync
#[embassy_executor::task]
pub async fn sync_task(stack: Stack<'static>, config: TimeConfig) -> ! {
    info!("Time sync task started (server={})", config.server.as_str());

    loop {
        match sntp::query_unix_time(stack, config.server.as_str()).await {
            Ok(unix_s) => {
                debug!("time sync ok: unix={}", unix_s);
                TIME_SYNC.signal(SyncPoint {
                    unix_s,
                    at: Instant::now(),
                });
            }
            Err(e) => warn!("time sync failed: {:?}", e),
        }

        Timer::after_secs(u64::from(config.sync_interval_s)).await;
    }
}
