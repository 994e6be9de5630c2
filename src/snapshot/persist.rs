//! Atomic snapshot persistence
//!
//! The artifact is written to a temporary file in the destination
//! directory, synced, then renamed over the previous artifact. Readers see
//! either the old snapshot or the new one, never a partial write.

use crate::snapshot::RunSnapshot;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur while writing the snapshot
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write snapshot in {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to replace {}: {source}", .path.display())]
    Rename {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Writes snapshots to a fixed location
#[derive(Debug, Clone)]
pub struct SnapshotPersister {
    path: PathBuf,
}

impl SnapshotPersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the snapshot, replacing any previous artifact
    ///
    /// Missing parent directories are created. Failures are returned as-is;
    /// nothing is retried.
    pub fn persist(&self, snapshot: &RunSnapshot) -> Result<(), PersistenceError> {
        let mut json = snapshot.to_json()?;
        json.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        fs::create_dir_all(dir).map_err(|source| PersistenceError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let write_err = |source| PersistenceError::Write {
            path: dir.to_path_buf(),
            source,
        };

        let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
        file.write_all(json.as_bytes()).map_err(write_err)?;
        file.as_file().sync_all().map_err(write_err)?;
        set_readable(&file).map_err(write_err)?;

        file.persist(&self.path)
            .map_err(|e| PersistenceError::Rename {
                path: self.path.clone(),
                source: e.error,
            })?;

        tracing::debug!("Persisted {} bytes to {}", json.len(), self.path.display());
        Ok(())
    }
}

/// Temp files are created owner-only; the artifact is meant to be shared
#[cfg(unix)]
fn set_readable(file: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.as_file()
        .set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_file: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}
