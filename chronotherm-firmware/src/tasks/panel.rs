//! Panel refresh task
//!
//! A HUB75 panel holds no image; it shows whatever is being clocked into
//! it right now. This task rescans the shared frame continuously, yielding
//! to the executor between passes.

use defmt::*;
use embassy_futures::yield_now;

use crate::hub75::{Frame, Hub75, FRAME, PANEL_HEIGHT, PANEL_WIDTH};

/// Continuous matrix rescan
#[embassy_executor::task]
pub async fn panel_task(mut driver: Hub75) -> ! {
    info!("Panel refresh task started ({}x{})", PANEL_WIDTH, PANEL_HEIGHT);

    let mut frame: Frame;
    loop {
        // Snapshot the shared frame so present() never tears a scan pass
        frame = FRAME.lock(|shared| *shared.borrow());
        driver.scan(&frame);
        yield_now().await;
    }
}
