use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported archive format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to open archive {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("zip-slip attack detected: entry '{entry}' resolves to '{resolved}'")]
    ZipSlip { entry: PathBuf, resolved: PathBuf },

    #[error("symlink target escapes base directory: '{entry}' -> '{target}'")]
    SymlinkEscape { entry: PathBuf, target: PathBuf },

    #[error("entry has an invalid path")]
    InvalidPath,

    #[error("archive is corrupted: {reason}")]
    Corrupted { reason: String },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error("failed to create symlink {link} -> {target}: {source}")]
    SymlinkCreationFailed {
        target: PathBuf,
        link: PathBuf,
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn corrupted(reason: impl std::fmt::Display) -> Self {
        Self::Corrupted {
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
