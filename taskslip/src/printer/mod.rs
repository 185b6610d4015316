//! Printer devices and the print session that drives them.
//!
//! Defines the [`PrinterDevice`] trait that every device backend implements.
//! Concrete implementations include:
//! - [`usb::UsbLinePrinter`] — USB receipt printer behind the OS line-printer driver
//! - [`memory::MemoryPrinter`] — in-process capture for tests and dry runs
//!
//! [`PrinterSession`] encodes a receipt to ESC/POS bytes and sends it over a
//! connection that only lives for the duration of one
//! [`transmit`](PrinterSession::transmit) call.

pub mod memory;
pub mod usb;

use std::io::Write;
use std::path::PathBuf;

use taskslip_proto::escpos;
use taskslip_proto::receipt::ReceiptCommand;

/// Errors that can occur while talking to a printer.
#[derive(Debug, thiserror::Error)]
pub enum PrinterError {
    /// No device matching the configured USB id is attached.
    #[error("no printer with USB id {vendor_id:04x}:{product_id:04x} found in {search_dir}")]
    DeviceNotFound {
        /// Configured USB vendor id.
        vendor_id: u16,
        /// Configured USB product id.
        product_id: u16,
        /// Directory that was scanned.
        search_dir: PathBuf,
    },

    /// The device exists but could not be opened.
    #[error("failed to open printer {device}: {source}")]
    Open {
        /// Device description (usually its path).
        device: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing or flushing the receipt failed.
    #[error("failed to write to printer {device}: {source}")]
    Write {
        /// Device description (usually its path).
        device: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A printer that can be connected to for one job at a time.
///
/// The returned connection is released when dropped; implementations must
/// not hold the device open between calls to [`open`](Self::open).
pub trait PrinterDevice {
    /// Live connection to the device.
    type Connection: Write;

    /// Opens a fresh connection.
    ///
    /// # Errors
    ///
    /// Returns [`PrinterError`] if the device is absent or cannot be opened.
    fn open(&self) -> Result<Self::Connection, PrinterError>;

    /// Human-readable device name for logs and error messages.
    fn describe(&self) -> String;
}

/// Sends formatted receipts to a [`PrinterDevice`].
///
/// A failed transmission is reported once and never retried.
pub struct PrinterSession<D: PrinterDevice> {
    device: D,
}

impl<D: PrinterDevice> PrinterSession<D> {
    /// Creates a session for the given device.
    pub const fn new(device: D) -> Self {
        Self { device }
    }

    /// Returns the underlying device.
    pub const fn device(&self) -> &D {
        &self.device
    }

    /// Encodes `commands` and writes them to the printer.
    ///
    /// The connection is opened here and dropped before returning, on
    /// success and on every error path.
    ///
    /// # Errors
    ///
    /// Returns [`PrinterError`] with the underlying cause if the device
    /// cannot be opened or the write fails.
    pub fn transmit(&self, commands: &[ReceiptCommand]) -> Result<(), PrinterError> {
        let bytes = escpos::encode(commands);
        let device = self.device.describe();

        let mut connection = self.device.open().inspect_err(|e| {
            tracing::warn!(device = %device, error = %e, "printer unavailable");
        })?;

        connection
            .write_all(&bytes)
            .and_then(|()| connection.flush())
            .map_err(|source| {
                tracing::warn!(device = %device, error = %source, "printer write failed");
                PrinterError::Write {
                    device: device.clone(),
                    source,
                }
            })?;

        tracing::info!(device = %device, bytes = bytes.len(), "receipt sent");
        Ok(())
    }
}
