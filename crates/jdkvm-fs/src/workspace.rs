use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A transient directory that is deleted when dropped.
///
/// Stale content left at the path by an interrupted run is cleared on
/// creation, so the workspace always starts empty.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.symlink_metadata().is_ok() {
            tracing::debug!(path = %root.display(), "clearing stale workspace");
            std::fs::remove_dir_all(&root).map_err(|e| Error::Remove {
                path: root.clone(),
                source: e,
            })?;
        }
        std::fs::create_dir_all(&root).map_err(|e| Error::Write {
            path: root.clone(),
            source: e,
        })?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// The directory that holds the workspace payload.
    ///
    /// Archives commonly wrap their content in one top-level directory; when
    /// the workspace holds exactly one entry and it is a directory, that entry
    /// is the payload. Otherwise the workspace root is. An empty workspace
    /// has no payload and fails with [`Error::EmptyWorkspace`].
    pub fn payload_root(&self) -> Result<PathBuf> {
        let read_err = |e| Error::Read {
            path: self.root.clone(),
            source: e,
        };
        let mut entries = std::fs::read_dir(&self.root).map_err(read_err)?;
        let first = match entries.next() {
            Some(entry) => entry.map_err(read_err)?,
            None => {
                return Err(Error::EmptyWorkspace {
                    path: self.root.clone(),
                });
            }
        };
        if entries.next().is_some() {
            return Ok(self.root.clone());
        }
        let is_dir = first.file_type().map_err(read_err)?.is_dir();
        Ok(if is_dir { first.path() } else { self.root.clone() })
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.root.symlink_metadata().is_ok() {
            if let Err(e) = std::fs::remove_dir_all(&self.root) {
                tracing::warn!(path = %self.root.display(), error = %e, "failed to clean workspace");
            }
        }
    }
}

/// A transient file that is deleted when dropped.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if self.path.symlink_metadata().is_ok() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove scratch file");
            }
        }
    }
}
