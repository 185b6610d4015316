//! In-memory printer for tests and dry runs.
//!
//! Clones share state, so a test can hand one clone to a
//! [`PrinterSession`](super::PrinterSession) and inspect the captured jobs
//! through another.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::{PrinterDevice, PrinterError};

/// Where a [`MemoryPrinter`] should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    /// Opening the connection fails with this error kind.
    Open(io::ErrorKind),
    /// Every write fails with this error kind.
    Write(io::ErrorKind),
}

#[derive(Debug, Default)]
struct Shared {
    /// Completed jobs, one entry per flushed connection.
    jobs: Mutex<Vec<Vec<u8>>>,
    /// Connections currently alive.
    open: AtomicUsize,
    /// Connections opened over the printer's lifetime.
    opened_total: AtomicUsize,
}

/// Printer that records every job in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrinter {
    shared: Arc<Shared>,
    fail: Option<FailOn>,
}

impl MemoryPrinter {
    /// Creates a printer that accepts every job.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a printer that fails at the given stage.
    #[must_use]
    pub fn failing(fail: FailOn) -> Self {
        Self {
            shared: Arc::default(),
            fail: Some(fail),
        }
    }

    /// Returns the bytes of every completed job, oldest first.
    #[must_use]
    pub fn jobs(&self) -> Vec<Vec<u8>> {
        self.shared.jobs.lock().clone()
    }

    /// Returns the number of connections that have not been dropped yet.
    #[must_use]
    pub fn open_connections(&self) -> usize {
        self.shared.open.load(Ordering::SeqCst)
    }

    /// Returns how many connections were opened in total.
    #[must_use]
    pub fn total_opens(&self) -> usize {
        self.shared.opened_total.load(Ordering::SeqCst)
    }
}

impl PrinterDevice for MemoryPrinter {
    type Connection = MemoryConnection;

    fn open(&self) -> Result<MemoryConnection, PrinterError> {
        if let Some(FailOn::Open(kind)) = self.fail {
            return Err(PrinterError::Open {
                device: self.describe(),
                source: io::Error::new(kind, "simulated open failure"),
            });
        }
        self.shared.open.fetch_add(1, Ordering::SeqCst);
        self.shared.opened_total.fetch_add(1, Ordering::SeqCst);
        Ok(MemoryConnection {
            shared: Arc::clone(&self.shared),
            buffer: Vec::new(),
            fail_write: match self.fail {
                Some(FailOn::Write(kind)) => Some(kind),
                _ => None,
            },
        })
    }

    fn describe(&self) -> String {
        "memory printer".to_string()
    }
}

/// Connection to a [`MemoryPrinter`]. Buffered bytes become a job on flush.
#[derive(Debug)]
pub struct MemoryConnection {
    shared: Arc<Shared>,
    buffer: Vec<u8>,
    fail_write: Option<io::ErrorKind>,
}

impl Write for MemoryConnection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(kind) = self.fail_write {
            return Err(io::Error::new(kind, "simulated write failure"));
        }
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            self.shared.jobs.lock().push(std::mem::take(&mut self.buffer));
        }
        Ok(())
    }
}

impl Drop for MemoryConnection {
    fn drop(&mut self) {
        self.shared.open.fetch_sub(1, Ordering::SeqCst);
    }
}
