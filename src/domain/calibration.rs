//! Distance calibration domain service
//!
//! This module converts raw ADC codes to voltages and voltages to distances
//! for the Sharp GP2Y0A41SK0F infrared sensor, and defines the window in
//! which those distances are trusted.

/// ADC scale parameters
///
/// Converts a raw ADC code to volts:
/// `voltage = raw * (reference_voltage / max_code)`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcScale {
    /// Full-scale reference voltage (volts)
    pub reference_voltage: f32,
    /// Highest code the converter produces
    pub max_code: u16,
}

impl AdcScale {
    /// 10-bit converter referenced to 5.0 V.
    ///
    /// The distance formula constants were fit against this scale, so every
    /// raw sample fed to the domain is expressed in it.
    pub const ARDUINO_10BIT: Self = Self {
        reference_voltage: 5.0,
        max_code: 1023,
    };

    /// RP2350 native ADC: 12-bit, referenced to the 3.3 V ADC_AVDD rail.
    pub const RP2350_12BIT: Self = Self {
        reference_voltage: 3.3,
        max_code: 4095,
    };

    /// Convert a raw code to volts
    #[inline]
    pub fn to_voltage(&self, raw: u16) -> f32 {
        raw as f32 * (self.reference_voltage / self.max_code as f32)
    }

    /// Express a voltage as the nearest code of this scale
    ///
    /// Rounds to nearest and clamps to `0..=max_code`.
    pub fn to_code(&self, voltage: f32) -> u16 {
        let code = voltage * (self.max_code as f32 / self.reference_voltage) + 0.5;
        if code <= 0.0 {
            0
        } else if code >= self.max_code as f32 {
            self.max_code
        } else {
            code as u16
        }
    }

    /// Re-express a code of `other` as a code of this scale
    pub fn rescale_from(&self, other: &AdcScale, raw: u16) -> u16 {
        self.to_code(other.to_voltage(raw))
    }

    /// Like [`rescale_from`](Self::rescale_from), but `None` when `raw` is at
    /// or above `other`'s full scale.
    ///
    /// A saturated code only says the input is at least the reference
    /// voltage, so it has no meaningful equivalent on this scale.
    pub fn rescale_unsaturated(&self, other: &AdcScale, raw: u16) -> Option<u16> {
        if raw >= other.max_code {
            return None;
        }
        Some(self.rescale_from(other, raw))
    }
}

impl Default for AdcScale {
    fn default() -> Self {
        Self::ARDUINO_10BIT
    }
}

/// Sharp IR inverse-voltage calibration
///
/// Approximates the sensor's response curve with
/// `distance_cm = numerator / (voltage - voltage_offset)`.
///
/// The formula is only meaningful inside the sensor's operating window
/// (see [`RangeWindow`]). A voltage equal to `voltage_offset` divides by zero
/// and yields `+inf`; callers rely on the range check to reject it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SharpCalibration {
    /// Numerator constant `K` (volt-centimeters)
    pub numerator: f32,
    /// Voltage offset `V0` (volts)
    pub voltage_offset: f32,
}

impl SharpCalibration {
    /// Published-curve fit for the GP2Y0A41SK0F (4–30 cm)
    pub const GP2Y0A41SK0F: Self = Self {
        numerator: 13.0,
        voltage_offset: 0.1,
    };

    /// Convert a sensor voltage to distance in centimeters
    #[inline]
    pub fn voltage_to_cm(&self, voltage: f32) -> f32 {
        self.numerator / (voltage - self.voltage_offset)
    }
}

impl Default for SharpCalibration {
    fn default() -> Self {
        Self::GP2Y0A41SK0F
    }
}

/// Inclusive window of trusted distances, in centimeters
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeWindow {
    /// Closest trusted distance
    pub min_cm: f32,
    /// Farthest trusted distance
    pub max_cm: f32,
}

impl RangeWindow {
    /// GP2Y0A41SK0F datasheet measuring range
    pub const GP2Y0A41SK0F: Self = Self {
        min_cm: 4.0,
        max_cm: 30.0,
    };

    /// Whether `distance_cm` lies inside the window (bounds included)
    ///
    /// NaN and infinities are never inside.
    #[inline]
    pub fn contains(&self, distance_cm: f32) -> bool {
        distance_cm >= self.min_cm && distance_cm <= self.max_cm
    }
}

impl Default for RangeWindow {
    fn default() -> Self {
        Self::GP2Y0A41SK0F
    }
}
