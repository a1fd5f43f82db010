//! Distance reading domain entity
//!
//! One reading lives for exactly one loop cycle. It has no knowledge of how
//! it was sampled or where its report is sent.

use super::calibration::{AdcScale, RangeWindow, SharpCalibration};
use crate::report_protocol::Report;

/// A single distance sample from the domain perspective.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceReading {
    /// Raw ADC code (10-bit, 5.0 V referenced)
    pub raw: u16,
    /// Sensor output voltage
    pub voltage: f32,
    /// Approximated distance in centimeters (may be non-finite)
    pub distance_cm: f32,
}

impl DistanceReading {
    /// Derive a reading from a raw code using the given scale and calibration
    pub fn from_raw(raw: u16, scale: &AdcScale, calibration: &SharpCalibration) -> Self {
        let voltage = scale.to_voltage(raw);
        let distance_cm = calibration.voltage_to_cm(voltage);
        Self {
            raw,
            voltage,
            distance_cm,
        }
    }

    /// Derive a reading with the GP2Y0A41SK0F constants on the 10-bit scale
    pub fn gp2y0a41(raw: u16) -> Self {
        Self::from_raw(
            raw,
            &AdcScale::ARDUINO_10BIT,
            &SharpCalibration::GP2Y0A41SK0F,
        )
    }

    /// Classify this reading against `window`
    pub fn classify(&self, window: &RangeWindow) -> Report {
        if window.contains(self.distance_cm) {
            Report::InRange {
                distance_cm: self.distance_cm,
            }
        } else {
            Report::OutOfRange
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_from_raw() {
        let reading = DistanceReading::gp2y0a41(577);
        assert_eq!(reading.raw, 577);
        assert!((reading.voltage - 2.8201).abs() < 1e-3);
        assert!((reading.distance_cm - 4.779).abs() < 1e-2);
    }

    #[test]
    fn test_classify_in_range() {
        let reading = DistanceReading::gp2y0a41(577);
        match reading.classify(&RangeWindow::GP2Y0A41SK0F) {
            Report::InRange { distance_cm } => assert_eq!(distance_cm, reading.distance_cm),
            Report::OutOfRange => panic!("expected in-range report"),
        }
    }

    #[test]
    fn test_classify_too_far_and_too_close() {
        let window = RangeWindow::GP2Y0A41SK0F;
        // ~33.4 cm
        assert_eq!(DistanceReading::gp2y0a41(100).classify(&window), Report::OutOfRange);
        // ~2.65 cm
        assert_eq!(DistanceReading::gp2y0a41(1023).classify(&window), Report::OutOfRange);
    }

    #[test]
    fn test_samples_around_offset_voltage() {
        // 0.1 V sits between codes 20 and 21, so no integer code hits the
        // singularity exactly. Both neighbours blow up and are rejected.
        let window = RangeWindow::GP2Y0A41SK0F;

        let below = DistanceReading::gp2y0a41(20);
        assert!(below.distance_cm < 0.0);
        assert_eq!(below.classify(&window), Report::OutOfRange);

        let above = DistanceReading::gp2y0a41(21);
        assert!(above.distance_cm > 1000.0);
        assert_eq!(above.classify(&window), Report::OutOfRange);

        let zero = DistanceReading::gp2y0a41(0);
        assert_eq!(zero.classify(&window), Report::OutOfRange);
    }
}
