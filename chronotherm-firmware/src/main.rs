//! Chronotherm - Wi-Fi clock/thermometer sign firmware
//!
//! Main firmware binary for a Raspberry Pi Pico W driving a HUB75 RGB LED
//! matrix. The sign shows either the current time (kept in sync over SNTP)
//! or the last temperature reading pushed to it, and accepts screen updates
//! as one-line HTTP requests on the local network:
//!
//! ```text
//! GET /screen?mode=1&temp=72 HTTP/1.1
//! ```
//!
//! All coordination logic lives in `chronotherm-core`; this crate wires it
//! to the radio, the network stack and the panel.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use embassy_net::StackResources;
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::hub75::{Hub75, Hub75Pins, PANEL_HEIGHT, PANEL_WIDTH};

mod channels;
mod config;
mod hub75;
mod sntp;
mod time;
mod tasks;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Seed for the network stack's local port/TCP sequence randomization.
/// Fixed is fine for a sign on a private network.
const NET_SEED: u64 = 0xC8_60_12_7F_44_3E_9A_05;

// Static cells for long-lived stack state (must live forever)
static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Chronotherm firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load configuration embedded at compile time
    let sign_config = config::load_config();
    info!(
        "Config: ssid={}, port={}, utc_offset={}s, tick={}ms",
        sign_config.network.ssid.as_str(),
        sign_config.server.port,
        sign_config.time.utc_offset_s,
        sign_config.tick_interval_ms
    );
    if (sign_config.panel.width as usize, sign_config.panel.height as usize)
        != (PANEL_WIDTH, PANEL_HEIGHT)
    {
        warn!(
            "Configured panel {}x{} does not match the built-in driver ({}x{})",
            sign_config.panel.width, sign_config.panel.height, PANEL_WIDTH, PANEL_HEIGHT
        );
    }

    // cyw43 radio firmware, flashed separately to keep iteration fast:
    //   probe-rs download 43439A0.bin --binary-format bin --chip RP2040 --base-address 0x10100000
    //   probe-rs download 43439A0_clm.bin --binary-format bin --chip RP2040 --base-address 0x10140000
    let fw = unsafe { core::slice::from_raw_parts(0x1010_0000 as *const u8, 230321) };
    let clm = unsafe { core::slice::from_raw_parts(0x1014_0000 as *const u8, 4752) };

    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(tasks::wifi_task(runner)).unwrap();

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;
    info!("Radio initialized");

    let net_config = embassy_net::Config::dhcpv4(Default::default());
    let (stack, net_runner) = embassy_net::new(
        net_device,
        net_config,
        NET_RESOURCES.init(StackResources::new()),
        NET_SEED,
    );
    spawner.spawn(tasks::net_task(net_runner)).unwrap();

    // Join, retrying until the access point lets us in
    info!("Connecting to Wi-Fi...");
    loop {
        match control
            .join(
                sign_config.network.ssid.as_str(),
                cyw43::JoinOptions::new(sign_config.network.password.as_bytes()),
            )
            .await
        {
            Ok(()) => break,
            Err(err) => {
                warn!("join failed with status={}, retrying", err.status);
                Timer::after_millis(500).await;
            }
        }
    }
    info!("Wi-Fi connected");

    stack.wait_config_up().await;
    if let Some(v4) = stack.config_v4() {
        info!("Sign IP address: {}", v4.address);
    }

    // HUB75 panel wiring: color pins, row address pins, control pins
    let panel_driver = Hub75::new(Hub75Pins {
        r1: Output::new(p.PIN_2, Level::Low),
        g1: Output::new(p.PIN_3, Level::Low),
        b1: Output::new(p.PIN_4, Level::Low),
        r2: Output::new(p.PIN_5, Level::Low),
        g2: Output::new(p.PIN_6, Level::Low),
        b2: Output::new(p.PIN_7, Level::Low),
        addr: [
            Output::new(p.PIN_8, Level::Low),
            Output::new(p.PIN_9, Level::Low),
            Output::new(p.PIN_10, Level::Low),
        ],
        clk: Output::new(p.PIN_11, Level::Low),
        lat: Output::new(p.PIN_12, Level::Low),
        oe: Output::new(p.PIN_13, Level::High),
    });

    // Spawn tasks
    spawner.spawn(tasks::panel_task(panel_driver)).unwrap();
    spawner
        .spawn(tasks::server_task(stack, sign_config.server.port))
        .unwrap();
    spawner
        .spawn(tasks::sync_task(stack, sign_config.time.clone()))
        .unwrap();
    spawner
        .spawn(tasks::controller_task(
            sign_config.time.utc_offset_s,
            sign_config.tick_interval_ms,
        ))
        .unwrap();

    info!("All tasks spawned, sign running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
