//! UART report adapter
//!
//! This adapter implements the ReportSinkPort trait for the RP2350's UART
//! transmitter, writing each report as a `\r\n` terminated text line.

use crate::ports::communication::{CommunicationError, ReportSinkPort};
use crate::report_protocol::LINE_TERMINATOR;
use embassy_rp::uart::{Blocking, UartTx};

/// UART transmit-only report adapter
pub struct UartReportAdapter<'a> {
    /// UART transmitter (blocking mode)
    tx: UartTx<'a, Blocking>,
}

impl<'a> UartReportAdapter<'a> {
    /// Create a new UART adapter
    pub fn new(tx: UartTx<'a, Blocking>) -> Self {
        Self { tx }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), CommunicationError> {
        self.tx
            .blocking_write(bytes)
            .map_err(|_| CommunicationError::SendFailed)
    }
}

impl<'a> ReportSinkPort for UartReportAdapter<'a> {
    async fn write_line(&mut self, line: &str) -> Result<(), CommunicationError> {
        self.write_bytes(line.as_bytes())?;
        self.write_bytes(LINE_TERMINATOR.as_bytes())?;
        self.tx
            .blocking_flush()
            .map_err(|_| CommunicationError::SendFailed)
    }
}
