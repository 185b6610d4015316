//! Application facade: one method per user action.
//!
//! Front-ends translate input into these calls and results into messages.
//! Every call starts from freshly loaded snapshots, so indices passed in
//! always refer to the list as it is on disk right now.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use taskslip_proto::print::PrintList;

use crate::config::AppConfig;
use crate::print::{PrintSessionBuilder, ReceiptFormatter, SelectionError};
use crate::printer::{PrinterDevice, PrinterError, PrinterSession};
use crate::tasks::{TaskError, TaskStore};

/// Errors surfaced to the front-end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Task list operation failed.
    #[error(transparent)]
    Task(#[from] TaskError),
    /// Selection was empty or the last print could not be stored.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// The receipt could not be sent.
    #[error("print failed: {0}")]
    Printer(#[from] PrinterError),
}

/// Summary of a completed print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintReport {
    /// Number of task lines printed.
    pub items: usize,
    /// Requested indices that were out of range.
    pub skipped: Vec<usize>,
}

/// Outcome of a reprint request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reprint {
    /// The last print was sent again.
    Printed {
        /// Number of task lines printed.
        items: usize,
    },
    /// Nothing has been printed yet.
    NothingToReprint,
}

/// Task list and printing operations over one printer device.
pub struct TaskApp<D: PrinterDevice> {
    tasks: TaskStore,
    prints: PrintSessionBuilder,
    printer: PrinterSession<D>,
}

impl<D: PrinterDevice> TaskApp<D> {
    /// Creates an app from its parts.
    pub const fn new(tasks: TaskStore, prints: PrintSessionBuilder, device: D) -> Self {
        Self {
            tasks,
            prints,
            printer: PrinterSession::new(device),
        }
    }

    /// Creates an app using the snapshot paths from `config`.
    pub fn from_config(config: &AppConfig, device: D) -> Self {
        Self::new(
            TaskStore::new(config.tasks_path()),
            PrintSessionBuilder::new(config.last_print_path()),
            device,
        )
    }

    /// Returns the current task list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Storage`] if the task file is unreadable or corrupt.
    pub fn list(&self) -> Result<Vec<String>, TaskError> {
        self.tasks.load()
    }

    /// Adds a task at the end of the list.
    ///
    /// A corrupt task file is replaced by a list holding only the new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::EmptyInput`] for blank text, or
    /// [`TaskError::Storage`] on I/O failure.
    pub fn add(&self, text: &str) -> Result<(), TaskError> {
        let mut tasks = match self.tasks.load() {
            Ok(tasks) => tasks,
            Err(e) if e.is_corrupt() => {
                tracing::warn!(error = %e, "task file corrupt, starting a new list");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        self.tasks.append(&mut tasks, text)
    }

    /// Replaces the text of the task at `index`.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::update`].
    pub fn update(&self, index: usize, text: &str) -> Result<(), TaskError> {
        let mut tasks = self.tasks.load()?;
        self.tasks.update(&mut tasks, index, text)
    }

    /// Removes the task at `index` and returns its text.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::remove`].
    pub fn remove(&self, index: usize) -> Result<String, TaskError> {
        let mut tasks = self.tasks.load()?;
        self.tasks.remove(&mut tasks, index)
    }

    /// Prints the selected tasks and records them as the last print.
    ///
    /// The last print is saved before transmitting, so a receipt that failed
    /// to print can still be replayed with [`reprint_last`](Self::reprint_last).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Selection`] if nothing valid was selected or the
    /// snapshot cannot be written, [`AppError::Task`] if the task list
    /// cannot be loaded, and [`AppError::Printer`] if transmission fails.
    pub fn print_selected(
        &self,
        indices: &[usize],
        evaluate: &HashMap<usize, bool>,
        now: NaiveDateTime,
    ) -> Result<PrintReport, AppError> {
        let tasks = self.tasks.load()?;
        let selection = PrintSessionBuilder::build_selection(&tasks, indices, evaluate)?;
        self.prints.save_last_print(&selection.list)?;
        self.send(&selection.list, now)?;
        Ok(PrintReport {
            items: selection.list.len(),
            skipped: selection.skipped,
        })
    }

    /// Prints the last print list again.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Selection`] if the snapshot is unreadable, or
    /// [`AppError::Printer`] if transmission fails.
    pub fn reprint_last(&self, now: NaiveDateTime) -> Result<Reprint, AppError> {
        let list = self.prints.load_last_print()?;
        if list.is_empty() {
            tracing::debug!("no previous print to replay");
            return Ok(Reprint::NothingToReprint);
        }
        self.send(&list, now)?;
        Ok(Reprint::Printed { items: list.len() })
    }

    fn send(&self, list: &PrintList, now: NaiveDateTime) -> Result<(), PrinterError> {
        let commands = ReceiptFormatter::format(list, now);
        self.printer.transmit(&commands)
    }
}
