//! Print sessions: selecting tasks for a receipt and laying it out.
//!
//! [`PrintSessionBuilder`] copies the chosen tasks into a
//! [`PrintList`](taskslip_proto::print::PrintList) and keeps the most recent
//! one as the "last print" snapshot for replay. [`ReceiptFormatter`] turns a
//! print list into the receipt command sequence.

pub mod receipt;
pub mod selection;

pub use receipt::ReceiptFormatter;
pub use selection::{PrintSessionBuilder, Selection};

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while building or persisting a print session.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// None of the requested indices referred to an existing task.
    #[error("no valid task selected")]
    NoSelection {
        /// Requested indices that were out of range, in request order.
        skipped: Vec<usize>,
    },
    /// The last-print snapshot could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
