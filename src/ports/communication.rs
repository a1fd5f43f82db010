//! Communication port - abstraction for the report output stream
//!
//! This trait allows the sensor loop to emit report lines without knowing
//! the specific transport (UART, USB CDC, an in-memory buffer, etc.)

use thiserror::Error;

/// Error type for communication operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommunicationError {
    /// Failed to send the line
    #[error("send failed")]
    SendFailed,
}

/// Port for line-oriented text output
///
/// # Example Implementation
///
/// ```ignore
/// struct UartReportAdapter<'a> {
///     tx: UartTx<'a, Blocking>,
/// }
///
/// impl<'a> ReportSinkPort for UartReportAdapter<'a> {
///     async fn write_line(&mut self, line: &str) -> Result<(), CommunicationError> {
///         self.tx.blocking_write(line.as_bytes()).map_err(|_| CommunicationError::SendFailed)?;
///         self.tx.blocking_write(b"\r\n").map_err(|_| CommunicationError::SendFailed)
///     }
/// }
/// ```
pub trait ReportSinkPort {
    /// Write `line` followed by the line terminator
    fn write_line(
        &mut self,
        line: &str,
    ) -> impl core::future::Future<Output = Result<(), CommunicationError>>;
}
