//! Sharp GP2Y0A41SK0F Distance Reporter
//!
//! This library provides a hexagonal architecture for reading a Sharp IR
//! distance sensor on the RP2350 and reporting the distance over a serial
//! link, plus the line protocol the host monitor uses to read it back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - AdcScale / SharpCalibration / RangeWindow services           │
//! │  - DistanceReading entity                                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - AnalogSensorPort: raw samples                                │
//! │  - ReportSinkPort: report lines                                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters (rp2350)                            │
//! │  - Gp2y0a41Sensor: ADC pin                                      │
//! │  - UartReportAdapter: UART TX at 9600 baud                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each cycle of [`SensorLoop`] computes
//!
//! ```text
//! voltage  = raw * (5.0 / 1023)
//! distance = 13.0 / (voltage - 0.1)
//! ```
//!
//! and emits `Distance: <d> cm` when `4.0 <= d <= 30.0`, `Out of range`
//! otherwise, then waits 80 ms.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

// ============================================================================
// Protocol (shared between host and device)
// ============================================================================

pub mod report_protocol;

pub use report_protocol::{ParseError, Report, ReportLine, REPORT_LINE_CAPACITY};

// ============================================================================
// Hexagonal Architecture
// ============================================================================

/// Domain layer - pure conversion logic
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Sensor loop - pipeline and timing driver
pub mod sensor_loop;

/// Adapters - RP2350 implementations
#[cfg(feature = "rp2350")]
pub mod adapters;

// Re-export key domain types
pub use domain::{AdcScale, DistanceReading, RangeWindow, SharpCalibration};

// Re-export key port traits
pub use ports::{AnalogSensorPort, CommunicationError, ReportSinkPort, SensorError};

pub use sensor_loop::{render_sample, sample_to_report, LoopConfig, SensorLoop};

// Re-export adapters
#[cfg(feature = "rp2350")]
pub use adapters::{Gp2y0a41Sensor, UartReportAdapter};
