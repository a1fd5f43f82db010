//! Shared line protocol for distance reports
//!
//! This module defines the text lines the device writes to its serial port
//! and the parser the host monitor uses to read them back.
//!
//! Each report is one line, terminated with `\r\n` on the wire:
//!
//! ```text
//! Distance: 4.78 cm
//! Out of range
//! ```

use core::fmt::{self, Write};

use heapless::String;
use thiserror::Error;

/// Text before the distance value of an in-range report
pub const DISTANCE_PREFIX: &str = "Distance: ";

/// Text after the distance value of an in-range report
pub const DISTANCE_SUFFIX: &str = " cm";

/// Full text of an out-of-range report
pub const OUT_OF_RANGE: &str = "Out of range";

/// Line terminator written after every report
pub const LINE_TERMINATOR: &str = "\r\n";

/// Value the legacy numeric stream uses for "out of range"
pub const LEGACY_OUT_OF_RANGE: f32 = -1.0;

/// Capacity of a rendered report line (terminator excluded)
pub const REPORT_LINE_CAPACITY: usize = 48;

/// Rendered report line
pub type ReportLine = String<REPORT_LINE_CAPACITY>;

/// Outcome of one measurement cycle
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// Distance inside the sensor's trusted window
    InRange {
        /// Distance in centimeters
        distance_cm: f32,
    },
    /// Distance outside the window, or no usable sample
    OutOfRange,
}

/// Error parsing a received line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line was empty after trimming
    #[error("empty line")]
    Empty,
    /// Line had the distance shape but the value did not parse
    #[error("invalid distance value")]
    InvalidNumber,
    /// Line matched no known report shape
    #[error("unrecognized line")]
    Unrecognized,
}

impl Report {
    /// Render the report into a fixed-capacity line (no terminator)
    ///
    /// Fails only if the rendered text exceeds [`REPORT_LINE_CAPACITY`],
    /// which an in-window distance never does.
    pub fn to_line(&self) -> Result<ReportLine, fmt::Error> {
        let mut line = ReportLine::new();
        write!(line, "{}", self)?;
        Ok(line)
    }

    /// Parse a received line
    ///
    /// Accepts the device's text reports and the legacy bare-number stream
    /// (`-1.0` meaning out of range). Surrounding whitespace is ignored.
    pub fn parse_line(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();

        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        if line == OUT_OF_RANGE {
            return Ok(Report::OutOfRange);
        }

        if let Some(rest) = line.strip_prefix(DISTANCE_PREFIX) {
            let value = rest
                .strip_suffix(DISTANCE_SUFFIX)
                .ok_or(ParseError::Unrecognized)?;
            let distance_cm = parse_finite(value.trim())?;
            return Ok(Report::InRange { distance_cm });
        }

        match line.parse::<f32>() {
            Ok(value) if value == LEGACY_OUT_OF_RANGE => Ok(Report::OutOfRange),
            Ok(value) if value.is_finite() => Ok(Report::InRange { distance_cm: value }),
            Ok(_) => Err(ParseError::InvalidNumber),
            Err(_) => Err(ParseError::Unrecognized),
        }
    }

    /// Distance carried by an in-range report
    pub fn distance_cm(&self) -> Option<f32> {
        match self {
            Report::InRange { distance_cm } => Some(*distance_cm),
            Report::OutOfRange => None,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::InRange { distance_cm } => {
                write!(f, "{}{:.2}{}", DISTANCE_PREFIX, distance_cm, DISTANCE_SUFFIX)
            }
            Report::OutOfRange => f.write_str(OUT_OF_RANGE),
        }
    }
}

fn parse_finite(value: &str) -> Result<f32, ParseError> {
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::InvalidNumber),
    }
}
