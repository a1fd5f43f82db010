//! Sensor port - abstraction for sampling the analog distance sensor
//!
//! This trait lets the sensor loop obtain raw samples without knowing the
//! specific hardware (RP2350 ADC pin, external converter, mock).

use thiserror::Error;

/// Error type for sensor operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Failed to read from sensor
    #[error("sensor read failed")]
    ReadFailed,
    /// Sample is unusable (converter saturated or out of its code range)
    #[error("sensor returned invalid data")]
    InvalidData,
}

/// Port for sampling an analog sensor
///
/// Samples are expressed as 10-bit codes on a 5.0 V reference
/// ([`AdcScale::ARDUINO_10BIT`](crate::domain::AdcScale::ARDUINO_10BIT)),
/// whatever the converter behind the adapter natively produces.
///
/// # Example Implementation
///
/// ```ignore
/// struct FixedSample(u16);
///
/// impl AnalogSensorPort for FixedSample {
///     async fn read_raw(&mut self) -> Result<u16, SensorError> {
///         Ok(self.0)
///     }
/// }
/// ```
pub trait AnalogSensorPort {
    /// Take one sample
    fn read_raw(&mut self) -> impl core::future::Future<Output = Result<u16, SensorError>>;

    /// Get the last native ADC value (for diagnostics)
    ///
    /// Returns `None` if the sensor doesn't expose raw values.
    fn last_raw_value(&self) -> Option<u16> {
        None
    }
}
