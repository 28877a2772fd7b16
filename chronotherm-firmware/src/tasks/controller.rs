//! Main controller task
//!
//! Runs the core controller tick on a fixed cadence: poll for one
//! forwarded request, advance the time client, render a frame. The
//! request-before-render order inside the tick means an update is visible
//! on the glass the same second it arrives.

use defmt::*;
use embassy_time::{Duration, Ticker};

use chronotherm_core::controller::Controller;

use crate::hub75::MatrixPanel;
use crate::tasks::server::NetRequests;
use crate::time::NtpTimeClient;

/// Controller task - the sign's steady-state loop
#[embassy_executor::task]
pub async fn controller_task(utc_offset_s: i32, tick_interval_ms: u32) {
    info!("Controller task started");

    let mut controller = Controller::new(NetRequests, NtpTimeClient::new(utc_offset_s));
    let mut panel = MatrixPanel::new();
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(tick_interval_ms)));

    loop {
        // Frame buffer writes are infallible; the Result is for real panels
        let _ = controller.run_tick(&mut panel);
        ticker.next().await;
    }
}
