//! Sensor loop - sample, convert, classify, report, wait
//!
//! The per-sample pipeline ([`sample_to_report`], [`render_sample`]) is pure
//! so it can be exercised without hardware or timers. [`SensorLoop`] drives
//! it against the ports and owns the fixed inter-cycle delay.

use core::fmt;

use embedded_hal_async::delay::DelayNs;

use crate::domain::{DistanceReading, RangeWindow};
use crate::ports::{AnalogSensorPort, ReportSinkPort};
use crate::report_protocol::{Report, ReportLine};

/// Fixed timing and link parameters of the loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopConfig {
    /// Delay after each report (milliseconds)
    pub interval_ms: u32,
    /// Serial link speed (baud)
    pub baud_rate: u32,
}

impl LoopConfig {
    /// 80 ms cadence on a 9600 baud link
    pub const DEFAULT: Self = Self {
        interval_ms: 80,
        baud_rate: 9600,
    };
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Convert a 10-bit raw sample into its report
pub fn sample_to_report(raw: u16) -> Report {
    DistanceReading::gp2y0a41(raw).classify(&RangeWindow::GP2Y0A41SK0F)
}

/// Convert a 10-bit raw sample into the line the device would emit
pub fn render_sample(raw: u16) -> Result<ReportLine, fmt::Error> {
    sample_to_report(raw).to_line()
}

/// The measurement loop
///
/// Owns the sensor, the output sink and the delay provider. Holds no state
/// between cycles: the same sample always produces the same line.
pub struct SensorLoop<S, W, D> {
    sensor: S,
    sink: W,
    delay: D,
    config: LoopConfig,
}

impl<S, W, D> SensorLoop<S, W, D>
where
    S: AnalogSensorPort,
    W: ReportSinkPort,
    D: DelayNs,
{
    /// Create a new sensor loop
    pub fn new(sensor: S, sink: W, delay: D, config: LoopConfig) -> Self {
        Self {
            sensor,
            sink,
            delay,
            config,
        }
    }

    /// Get the output adapter
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Run one cycle without waiting: sample, classify, emit one line
    ///
    /// A failed read is reported as out of range so every cycle still emits
    /// exactly one line. A failed write is logged and dropped.
    pub async fn run_cycle(&mut self) -> Report {
        let report = match self.sensor.read_raw().await {
            Ok(raw) => {
                let report = sample_to_report(raw);
                debug!(
                    "raw={} native={:?} report={:?}",
                    raw,
                    self.sensor.last_raw_value(),
                    report
                );
                report
            }
            Err(e) => {
                warn!("Sensor read failed: {:?}", e);
                Report::OutOfRange
            }
        };

        match report.to_line() {
            Ok(line) => {
                if let Err(e) = self.sink.write_line(&line).await {
                    warn!("Failed to write report: {:?}", e);
                }
            }
            Err(_) => {
                error!("Report did not fit the line buffer");
            }
        }

        report
    }

    /// Run one cycle, then block for the configured interval
    pub async fn step(&mut self) -> Report {
        let report = self.run_cycle().await;
        self.delay.delay_ms(self.config.interval_ms).await;
        report
    }

    /// Run forever
    pub async fn run(&mut self) -> ! {
        info!(
            "Sensor loop started ({} ms interval, {} baud)",
            self.config.interval_ms,
            self.config.baud_rate
        );

        loop {
            self.step().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AdcScale;
    use crate::ports::{CommunicationError, SensorError};
    use embassy_futures::block_on;
    use proptest::prelude::*;

    struct ScriptedSensor {
        samples: Vec<Result<u16, SensorError>>,
        next: usize,
    }

    impl ScriptedSensor {
        fn new(samples: &[Result<u16, SensorError>]) -> Self {
            Self {
                samples: samples.to_vec(),
                next: 0,
            }
        }
    }

    impl AnalogSensorPort for ScriptedSensor {
        async fn read_raw(&mut self) -> Result<u16, SensorError> {
            let sample = self.samples[self.next % self.samples.len()];
            self.next += 1;
            sample
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        lines: Vec<String>,
        fail: bool,
    }

    impl ReportSinkPort for RecordingSink {
        async fn write_line(&mut self, line: &str) -> Result<(), CommunicationError> {
            if self.fail {
                return Err(CommunicationError::SendFailed);
            }
            self.lines.push(line.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingDelay {
        total_ns: u64,
    }

    impl DelayNs for RecordingDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn sensor_loop(
        samples: &[Result<u16, SensorError>],
    ) -> SensorLoop<ScriptedSensor, RecordingSink, RecordingDelay> {
        SensorLoop::new(
            ScriptedSensor::new(samples),
            RecordingSink::default(),
            RecordingDelay::default(),
            LoopConfig::DEFAULT,
        )
    }

    #[test]
    fn test_scenario_close_object() {
        // 577 -> 2.820 V -> 4.779 cm
        assert_eq!(render_sample(577).unwrap().as_str(), "Distance: 4.78 cm");
    }

    #[test]
    fn test_scenario_too_far() {
        // 100 -> 0.489 V -> 33.44 cm
        assert_eq!(render_sample(100).unwrap().as_str(), "Out of range");
    }

    #[test]
    fn test_scenario_full_scale_too_close() {
        // 1023 -> 5.0 V -> 2.653 cm
        assert_eq!(render_sample(1023).unwrap().as_str(), "Out of range");
    }

    #[test]
    fn test_window_edges() {
        assert_eq!(render_sample(109).unwrap().as_str(), "Out of range");
        assert_eq!(render_sample(110).unwrap().as_str(), "Distance: 29.71 cm");
        assert_eq!(render_sample(685).unwrap().as_str(), "Distance: 4.00 cm");
        assert_eq!(render_sample(686).unwrap().as_str(), "Out of range");
    }

    #[test]
    fn test_degenerate_offset_voltage() {
        // No 10-bit code maps to exactly 0.1 V; codes 20 and 21 straddle it.
        // Whatever the arithmetic yields there, the window rejects it.
        assert_eq!(sample_to_report(20), Report::OutOfRange);
        assert_eq!(sample_to_report(21), Report::OutOfRange);

        let at_offset = crate::domain::SharpCalibration::GP2Y0A41SK0F.voltage_to_cm(0.1);
        assert!(!RangeWindow::GP2Y0A41SK0F.contains(at_offset));
    }

    #[test]
    fn test_cycle_emits_one_line_then_waits() {
        let mut lp = sensor_loop(&[Ok(577)]);

        let report = block_on(lp.step());

        assert!(matches!(report, Report::InRange { .. }));
        assert_eq!(lp.sink().lines, vec!["Distance: 4.78 cm".to_string()]);
        assert_eq!(lp.delay.total_ns, 80_000_000);
    }

    #[test]
    fn test_run_cycle_does_not_wait() {
        let mut lp = sensor_loop(&[Ok(100)]);

        let report = block_on(lp.run_cycle());

        assert_eq!(report, Report::OutOfRange);
        assert_eq!(lp.sink().lines, vec!["Out of range".to_string()]);
        assert_eq!(lp.delay.total_ns, 0);
    }

    #[test]
    fn test_same_sample_same_line() {
        let mut lp = sensor_loop(&[Ok(300)]);

        block_on(async {
            for _ in 0..5 {
                lp.step().await;
            }
        });

        let lines = &lp.sink().lines;
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l == &lines[0]));
        assert_eq!(lp.delay.total_ns, 5 * 80_000_000);
    }

    #[test]
    fn test_read_failure_reports_out_of_range() {
        let mut lp = sensor_loop(&[Err(SensorError::ReadFailed), Ok(577)]);

        block_on(async {
            lp.step().await;
            lp.step().await;
        });

        assert_eq!(
            lp.sink().lines,
            vec!["Out of range".to_string(), "Distance: 4.78 cm".to_string()]
        );
    }

    #[test]
    fn test_rejected_sample_reports_out_of_range() {
        let mut lp = sensor_loop(&[Err(SensorError::InvalidData)]);

        let report = block_on(lp.step());

        assert_eq!(report, Report::OutOfRange);
        assert_eq!(lp.sink().lines, vec!["Out of range".to_string()]);
        assert_eq!(lp.delay.total_ns, 80_000_000);
    }

    #[test]
    fn test_write_failure_keeps_looping() {
        let mut lp = SensorLoop::new(
            ScriptedSensor::new(&[Ok(577)]),
            RecordingSink {
                lines: Vec::new(),
                fail: true,
            },
            RecordingDelay::default(),
            LoopConfig::DEFAULT,
        );

        let first = block_on(lp.step());
        let second = block_on(lp.step());

        assert_eq!(first, second);
        assert!(lp.sink().lines.is_empty());
        assert_eq!(lp.delay.total_ns, 2 * 80_000_000);
    }

    #[test]
    fn test_default_config() {
        let config = LoopConfig::default();
        assert_eq!(config.interval_ms, 80);
        assert_eq!(config.baud_rate, 9600);
    }

    proptest! {
        #[test]
        fn prop_voltage_within_reference(raw in 0u16..=1023) {
            let voltage = AdcScale::ARDUINO_10BIT.to_voltage(raw);
            prop_assert!((0.0..=5.0).contains(&voltage));
        }

        #[test]
        fn prop_line_matches_classification(raw in 0u16..=1023) {
            let reading = DistanceReading::gp2y0a41(raw);
            let line = render_sample(raw).unwrap();

            if reading.distance_cm >= 4.0 && reading.distance_cm <= 30.0 {
                prop_assert_eq!(line.as_str(), format!("Distance: {:.2} cm", reading.distance_cm));
            } else {
                prop_assert_eq!(line.as_str(), "Out of range");
            }
        }

        #[test]
        fn prop_sample_is_idempotent(raw in 0u16..=1023) {
            prop_assert_eq!(render_sample(raw).unwrap(), render_sample(raw).unwrap());
        }
    }
}
