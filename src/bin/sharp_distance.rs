//! Sharp GP2Y0A41SK0F Distance Reporter (RP2350 firmware)
//!
//! Samples the IR distance sensor on GPIO26 (ADC0) and writes one report line
//! per cycle to UART0 TX (GPIO0) at 9600 baud:
//!
//! ```text
//! Distance: 12.34 cm
//! Out of range
//! ```
//!
//! ## Wiring
//!
//! - Sensor Vo  -> GPIO26 (ADC0)
//! - Sensor VCC -> 5V (VBUS), GND -> GND
//! - GPIO0 (UART0 TX) -> host USB-serial RX
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --features rp2350 --bin sharp_distance --target thumbv8m.main-none-eabihf
//! cargo run --features std --bin sharp_monitor -- --port /dev/ttyUSB0
//! ```

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::Pull;
use embassy_rp::uart::{Config as UartConfig, UartTx};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use sharp_ir::adapters::{Gp2y0a41Sensor, UartReportAdapter};
use sharp_ir::sensor_loop::{LoopConfig, SensorLoop};

/// Boot ROM image definition
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

// ============================================================================
// Main Entry Point
// ============================================================================

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("=== GP2Y0A41SK0F Distance Reporter ===");

    let p = embassy_rp::init(Default::default());
    let config = LoopConfig::DEFAULT;

    // Sensor Adapter: GP2Y0A41SK0F on ADC0
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let channel = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let sensor = Gp2y0a41Sensor::new(adc, channel);
    info!("Sensor adapter created (GPIO26 / ADC0)");

    // Output Adapter: UART0 TX
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.baud_rate;
    let tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);
    let sink = UartReportAdapter::new(tx);
    info!("UART adapter created (GPIO0, {} baud)", config.baud_rate);

    let mut sensor_loop = SensorLoop::new(sensor, sink, Delay, config);
    sensor_loop.run().await
}
