//! Skwatch - Watchface Firmware
//!
//! Time, date, weather, battery and step count on an RP2040 watch, with
//! weather and settings pushed from a phone companion over UART.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart, UartTx};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use skwatch_hal_rp2040::battery::BatterySense;
use skwatch_hal_rp2040::flash::FlashStorage;

use crate::config::{load_config, log_config};

mod channels;
mod clock;
mod config;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Skwatch firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Configuration: flash override, else the embedded watchface.toml
    let mut storage = FlashStorage::new(p.FLASH);
    let config = load_config(&mut storage);
    log_config(&config);

    // Companion link on UART0 (GPIO0 TX, GPIO1 RX)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (companion_tx, companion_rx) = uart.split();
    info!("Companion UART initialized");

    // Panel link on UART1 (GPIO4 TX only)
    let panel_tx = UartTx::new(p.UART1, p.PIN_4, p.DMA_CH0, UartConfig::default());
    info!("Panel UART initialized");

    // Battery: VSYS on ADC3 (GPIO29), VBUS detect on GPIO24
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let vsys = Channel::new_pin(p.PIN_29, Pull::None);
    let vbus = Input::new(p.PIN_24, Pull::None);
    let mut battery = BatterySense::new(adc, vsys, vbus);
    let boot_battery = tasks::battery::read_once(&mut battery, &config.battery.curve).await;

    spawner.spawn(tasks::panel_tx_task(panel_tx)).unwrap();
    spawner.spawn(tasks::companion_rx_task(companion_rx)).unwrap();
    spawner.spawn(tasks::companion_tx_task(companion_tx)).unwrap();
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner
        .spawn(tasks::battery_task(
            battery,
            config.battery.curve.clone(),
            config.battery.sample_secs,
            boot_battery,
        ))
        .unwrap();

    // Step detector output on GPIO15, active high
    if config.steps.sensor {
        let detector = Input::new(p.PIN_15, Pull::Down);
        spawner.spawn(tasks::pedometer_task(detector)).unwrap();
    } else {
        info!("Step sensor disabled");
    }

    spawner
        .spawn(tasks::watchface_task(config, storage, boot_battery))
        .unwrap();

    info!("All tasks spawned");
}
