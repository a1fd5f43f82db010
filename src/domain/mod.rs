//! Domain layer - pure sensor logic independent of infrastructure
//!
//! This module contains the conversion services and the per-cycle reading
//! entity of the distance sensor application.

pub mod calibration;
pub mod reading;

pub use calibration::{AdcScale, RangeWindow, SharpCalibration};
pub use reading::DistanceReading;
