//! JSON snapshot files with atomic replacement.
//!
//! Each concern (task list, last print) owns exactly one snapshot file.
//! A snapshot is always rewritten whole: the new content goes to a hidden
//! sibling temp file which is fsynced and then renamed over the target, so
//! readers see either the old file or the new one, never a partial write.
//!
//! Snapshots are pretty-printed with four-space indentation and non-ASCII
//! text kept verbatim, which keeps files byte-compatible across
//! load/save cycles.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors that can occur when reading or writing a snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The snapshot exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The snapshot could not be written or replaced.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path that was being written (snapshot or its temp file).
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The snapshot exists but does not have the expected structure.
    #[error("snapshot {path} is corrupt: {source}")]
    Corrupt {
        /// Snapshot path.
        path: PathBuf,
        /// Parse error describing what was wrong.
        source: serde_json::Error,
    },

    /// The value could not be serialized.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StorageError {
    /// Returns `true` if the snapshot exists but could not be parsed.
    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// A single JSON snapshot on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Creates a handle for the snapshot at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the snapshot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the snapshot.
    ///
    /// A missing file yields `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] on I/O failure and
    /// [`StorageError::Corrupt`] if the content does not parse as `T`.
    pub fn load<T>(&self) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "snapshot missing, using empty value");
                return Ok(T::default());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Atomically replaces the snapshot with `value`.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialize`] if `value` cannot be encoded, or
    /// [`StorageError::Write`] if any filesystem step fails. On error the
    /// previous snapshot is left in place.
    pub fn store<T>(&self, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + ?Sized,
    {
        let bytes = to_pretty_json(value).map_err(StorageError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp_path = self.temp_path();
        let write_tmp = || -> std::io::Result<()> {
            let mut file = std::fs::File::create(&tmp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()
        };
        if let Err(source) = write_tmp() {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(StorageError::Write {
                path: tmp_path,
                source,
            });
        }

        std::fs::rename(&tmp_path, &self.path).map_err(|source| {
            let _ = std::fs::remove_file(&tmp_path);
            StorageError::Write {
                path: self.path.clone(),
                source,
            }
        })?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }

    /// Hidden temp file next to the snapshot, so the rename stays on one filesystem.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "snapshot".into(), |n| n.to_string_lossy());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

/// Serializes `value` as JSON indented by four spaces.
///
/// # Errors
///
/// Returns the serializer error if `value` cannot be represented as JSON.
pub fn to_pretty_json<T>(value: &T) -> Result<Vec<u8>, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}
