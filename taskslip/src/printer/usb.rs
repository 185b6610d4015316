//! USB receipt printer exposed through the OS line-printer driver.
//!
//! The kernel's `usblp` driver publishes each attached printer as a
//! character device (`/dev/usb/lpN`) and a matching `usbmisc` class entry
//! whose parent USB device carries `idVendor` / `idProduct` attributes.
//! The device node is located by scanning those entries for the configured
//! id, unless an explicit node path is configured.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use super::{PrinterDevice, PrinterError};

/// USB vendor id of the default receipt printer.
pub const DEFAULT_VENDOR_ID: u16 = 0x6868;

/// USB product id of the default receipt printer.
pub const DEFAULT_PRODUCT_ID: u16 = 0x0200;

/// Default directory holding line-printer device nodes.
pub const DEFAULT_DEV_DIR: &str = "/dev/usb";

/// Default `usbmisc` class directory.
pub const DEFAULT_SYSFS_DIR: &str = "/sys/class/usbmisc";

/// A USB line printer identified by vendor/product id or device path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsbLinePrinter {
    vendor_id: u16,
    product_id: u16,
    device: Option<PathBuf>,
    dev_dir: PathBuf,
    sysfs_dir: PathBuf,
}

impl Default for UsbLinePrinter {
    fn default() -> Self {
        Self::new(DEFAULT_VENDOR_ID, DEFAULT_PRODUCT_ID)
    }
}

impl UsbLinePrinter {
    /// Creates a printer located by USB id under the default directories.
    #[must_use]
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            device: None,
            dev_dir: PathBuf::from(DEFAULT_DEV_DIR),
            sysfs_dir: PathBuf::from(DEFAULT_SYSFS_DIR),
        }
    }

    /// Uses `device` directly instead of searching by USB id.
    #[must_use]
    pub fn with_device(mut self, device: Option<PathBuf>) -> Self {
        self.device = device;
        self
    }

    /// Overrides the device-node and class directories used for lookup.
    #[must_use]
    pub fn with_dirs(mut self, dev_dir: impl Into<PathBuf>, sysfs_dir: impl Into<PathBuf>) -> Self {
        self.dev_dir = dev_dir.into();
        self.sysfs_dir = sysfs_dir.into();
        self
    }

    /// Returns the device node to open.
    ///
    /// # Errors
    ///
    /// Returns [`PrinterError::DeviceNotFound`] if no explicit device is
    /// configured and no `lpN` entry matches the USB id.
    pub fn resolve(&self) -> Result<PathBuf, PrinterError> {
        if let Some(device) = &self.device {
            return Ok(device.clone());
        }

        let not_found = || PrinterError::DeviceNotFound {
            vendor_id: self.vendor_id,
            product_id: self.product_id,
            search_dir: self.sysfs_dir.clone(),
        };

        let entries = std::fs::read_dir(&self.sysfs_dir).map_err(|e| {
            tracing::debug!(dir = %self.sysfs_dir.display(), error = %e, "cannot scan usbmisc");
            not_found()
        })?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| name.starts_with("lp"))
            .collect();
        names.sort();

        names
            .into_iter()
            .find(|name| self.matches(&self.sysfs_dir.join(name)))
            .map(|name| self.dev_dir.join(name))
            .ok_or_else(not_found)
    }

    /// Checks the USB ids of the device behind a `usbmisc` entry.
    ///
    /// `device` points at the USB interface; the ids live on its parent.
    fn matches(&self, entry: &Path) -> bool {
        let usb_device = entry.join("device").join("..");
        read_hex_id(&usb_device.join("idVendor")) == Some(self.vendor_id)
            && read_hex_id(&usb_device.join("idProduct")) == Some(self.product_id)
    }
}

fn read_hex_id(path: &Path) -> Option<u16> {
    let raw = std::fs::read_to_string(path).ok()?;
    u16::from_str_radix(raw.trim(), 16).ok()
}

impl PrinterDevice for UsbLinePrinter {
    type Connection = File;

    fn open(&self) -> Result<File, PrinterError> {
        let path = self.resolve()?;
        tracing::debug!(path = %path.display(), "opening printer");
        OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|source| PrinterError::Open {
                device: path.display().to_string(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.device.as_ref().map_or_else(
            || format!("usb {:04x}:{:04x}", self.vendor_id, self.product_id),
            |d| d.display().to_string(),
        )
    }
}
