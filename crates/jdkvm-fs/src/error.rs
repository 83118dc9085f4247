use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },

    #[error("destination already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("cannot move {from} to {to}: staging and destination are on different volumes")]
    CrossesDevices { from: PathBuf, to: PathBuf },

    #[error("failed to move {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("failed to create link {link} -> {target}: {source}")]
    Link {
        link: PathBuf,
        target: PathBuf,
        source: io::Error,
    },

    #[error("{path} is empty")]
    EmptyWorkspace { path: PathBuf },

    #[error("{path} exists but is not a directory link")]
    NotALink { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
