//! Sharp GP2Y0A41SK0F analog sensor adapter
//!
//! This adapter implements the AnalogSensorPort trait for the IR distance
//! sensor wired to one of the RP2350's ADC-capable pins.

use crate::domain::AdcScale;
use crate::ports::sensor::{AnalogSensorPort, SensorError};
use core::sync::atomic::{AtomicU16, Ordering};
use embassy_rp::adc::{Adc, Blocking, Channel as AdcChannel};

/// GP2Y0A41SK0F sensor on an RP2350 ADC pin
///
/// The RP2350 samples at 12 bits against 3.3 V. Each sample is converted to
/// volts and re-expressed as the 10-bit, 5.0 V code the distance formula
/// expects, so the calibration constants keep their physical meaning.
/// A saturated sample is rejected with [`SensorError::InvalidData`].
pub struct Gp2y0a41Sensor<'a> {
    /// ADC peripheral (blocking mode)
    adc: Adc<'a, Blocking>,
    /// Sensor output pin channel
    channel: AdcChannel<'a>,
    /// Native converter scale
    native: AdcScale,
    /// Last native ADC value (for diagnostics)
    last_raw: AtomicU16,
}

impl<'a> Gp2y0a41Sensor<'a> {
    /// Create a new sensor adapter
    ///
    /// # Arguments
    ///
    /// * `adc` - ADC peripheral in blocking mode
    /// * `channel` - ADC channel of the sensor's Vo pin
    pub fn new(adc: Adc<'a, Blocking>, channel: AdcChannel<'a>) -> Self {
        Self {
            adc,
            channel,
            native: AdcScale::RP2350_12BIT,
            last_raw: AtomicU16::new(0),
        }
    }
}

impl<'a> AnalogSensorPort for Gp2y0a41Sensor<'a> {
    async fn read_raw(&mut self) -> Result<u16, SensorError> {
        let native_raw = self
            .adc
            .blocking_read(&mut self.channel)
            .map_err(|_| SensorError::ReadFailed)?;

        self.last_raw.store(native_raw, Ordering::Relaxed);

        // Full scale only bounds the voltage from below.
        AdcScale::ARDUINO_10BIT
            .rescale_unsaturated(&self.native, native_raw)
            .ok_or(SensorError::InvalidData)
    }

    fn last_raw_value(&self) -> Option<u16> {
        Some(self.last_raw.load(Ordering::Relaxed))
    }
}
