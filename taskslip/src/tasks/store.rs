//! Task store for position-indexed task CRUD.
//!
//! Every mutating call writes the whole list back before returning. If the
//! write fails the in-memory change is rolled back, so the caller's list
//! and the file never disagree.

use std::path::{Path, PathBuf};

use super::TaskError;
use crate::storage::SnapshotFile;

/// Loads and saves the ordered task list.
#[derive(Debug, Clone)]
pub struct TaskStore {
    file: SnapshotFile,
}

impl TaskStore {
    /// Creates a store backed by the snapshot at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: SnapshotFile::new(path),
        }
    }

    /// Returns the snapshot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the task list. Returns an empty list if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Storage`] if the file cannot be read or is not
    /// a JSON array of strings.
    pub fn load(&self) -> Result<Vec<String>, TaskError> {
        let tasks: Vec<String> = self.file.load()?;
        tracing::debug!(count = tasks.len(), "tasks loaded");
        Ok(tasks)
    }

    /// Overwrites the stored list with `tasks`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Storage`] if the snapshot cannot be written.
    pub fn save(&self, tasks: &[String]) -> Result<(), TaskError> {
        self.file.store(tasks)?;
        Ok(())
    }

    /// Appends a task after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::EmptyInput`] if the trimmed text is empty (the
    /// list is untouched), or [`TaskError::Storage`] if saving fails.
    pub fn append(&self, tasks: &mut Vec<String>, text: &str) -> Result<(), TaskError> {
        let text = non_empty(text)?;
        tasks.push(text.to_string());
        if let Err(e) = self.save(tasks) {
            tasks.pop();
            return Err(e);
        }
        tracing::info!(index = tasks.len() - 1, "task added");
        Ok(())
    }

    /// Replaces the task at `index` with the trimmed `text`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`], [`TaskError::EmptyInput`],
    /// or [`TaskError::Storage`] if saving fails.
    pub fn update(&self, tasks: &mut [String], index: usize, text: &str) -> Result<(), TaskError> {
        check_index(tasks, index)?;
        let text = non_empty(text)?;
        let previous = std::mem::replace(&mut tasks[index], text.to_string());
        if let Err(e) = self.save(tasks) {
            tasks[index] = previous;
            return Err(e);
        }
        tracing::info!(index, "task updated");
        Ok(())
    }

    /// Removes the task at `index`, shifting later tasks down by one.
    ///
    /// Returns the removed text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`] or [`TaskError::Storage`] if
    /// saving fails.
    pub fn remove(&self, tasks: &mut Vec<String>, index: usize) -> Result<String, TaskError> {
        check_index(tasks, index)?;
        let removed = tasks.remove(index);
        if let Err(e) = self.save(tasks) {
            tasks.insert(index, removed);
            return Err(e);
        }
        tracing::info!(index, "task removed");
        Ok(removed)
    }
}

fn non_empty(text: &str) -> Result<&str, TaskError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyInput);
    }
    Ok(trimmed)
}

const fn check_index(tasks: &[String], index: usize) -> Result<(), TaskError> {
    if index >= tasks.len() {
        return Err(TaskError::IndexOutOfRange {
            index,
            len: tasks.len(),
        });
    }
    Ok(())
}
