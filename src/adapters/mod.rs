//! Adapters - concrete implementations of ports
//!
//! Adapters connect the sensor loop to the RP2350 hardware by implementing
//! the port traits.
//!
//! # Available Adapters
//!
//! - **gp2y0a41**: Sharp GP2Y0A41SK0F IR distance sensor via ADC
//! - **uart**: UART text output

pub mod gp2y0a41;
pub mod uart;

pub use gp2y0a41::Gp2y0a41Sensor;
pub use uart::UartReportAdapter;
