//! Ports (interfaces) defining the boundaries of the application
//!
//! Ports are traits that define how the sensor loop interacts with hardware.
//! They keep the domain and the loop independent of specific implementations.
//!
//! - **AnalogSensorPort**: where raw samples come from (ADC pin, mock)
//! - **ReportSinkPort**: where report lines go (UART, mock)

pub mod communication;
pub mod sensor;

pub use communication::{CommunicationError, ReportSinkPort};
pub use sensor::{AnalogSensorPort, SensorError};
