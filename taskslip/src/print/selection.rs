//! Builds print lists from a task selection and persists the last one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use taskslip_proto::print::{PrintItem, PrintList};

use super::SelectionError;
use crate::storage::SnapshotFile;

/// Result of a successful selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Copies of the selected tasks, in request order.
    pub list: PrintList,
    /// Requested indices that were out of range and left out.
    pub skipped: Vec<usize>,
}

/// Owns the "last print" snapshot and builds new print lists.
#[derive(Debug, Clone)]
pub struct PrintSessionBuilder {
    last_print: SnapshotFile,
}

impl PrintSessionBuilder {
    /// Creates a builder whose last-print snapshot lives at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            last_print: SnapshotFile::new(path),
        }
    }

    /// Returns the last-print snapshot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.last_print.path()
    }

    /// Copies the tasks at `indices` into a new print list.
    ///
    /// Items follow the order of `indices`, not task order, and repeated
    /// indices produce repeated items. The evaluate flag of each item is
    /// looked up by task index in `evaluate`; a missing entry means `false`.
    /// Out-of-range indices are skipped and reported in
    /// [`Selection::skipped`].
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NoSelection`] if no index was valid.
    pub fn build_selection(
        tasks: &[String],
        indices: &[usize],
        evaluate: &HashMap<usize, bool>,
    ) -> Result<Selection, SelectionError> {
        let mut list = PrintList::new();
        let mut skipped = Vec::new();

        for &index in indices {
            let Some(task) = tasks.get(index) else {
                tracing::warn!(index, len = tasks.len(), "skipping out-of-range selection");
                skipped.push(index);
                continue;
            };
            let flag = evaluate.get(&index).copied().unwrap_or(false);
            list.push(PrintItem::new(task.clone(), flag));
        }

        if list.is_empty() {
            return Err(SelectionError::NoSelection { skipped });
        }
        Ok(Selection { list, skipped })
    }

    /// Replaces the last-print snapshot with `list`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Storage`] if the snapshot cannot be written.
    pub fn save_last_print(&self, list: &PrintList) -> Result<(), SelectionError> {
        self.last_print.store(list)?;
        tracing::debug!(items = list.len(), "last print saved");
        Ok(())
    }

    /// Loads the last-print snapshot. Empty if nothing was printed yet.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Storage`] if the snapshot cannot be read
    /// or is malformed.
    pub fn load_last_print(&self) -> Result<PrintList, SelectionError> {
        Ok(self.last_print.load()?)
    }
}
