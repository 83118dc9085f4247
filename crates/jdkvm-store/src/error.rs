use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("version `{name}` is already installed")]
    AlreadyInstalled { name: String },

    #[error("version `{name}` is not installed")]
    NotInstalled { name: String },

    #[error("`{name}` is not a valid version name")]
    InvalidName { name: String },

    #[error("failed to download `{name}` from {url}")]
    DownloadFailed {
        name: String,
        url: String,
        source: BoxError,
    },

    #[error("failed to extract {archive}")]
    ExtractFailed {
        name: String,
        archive: PathBuf,
        source: BoxError,
    },

    #[error("failed to install `{name}` at {path}")]
    InstallFailed {
        name: String,
        path: PathBuf,
        source: jdkvm_fs::Error,
    },

    #[error(transparent)]
    SwitchFailed(SwitchFailure),

    #[error("active link {link} is corrupt: {reason}")]
    SwitchCorrupt { link: PathBuf, reason: String },

    #[error("failed to remove `{name}`, {path} may be left behind")]
    RemoveFailed {
        name: String,
        path: PathBuf,
        source: jdkvm_fs::Error,
    },
}

impl Error {
    /// True when a failed switch left no version active.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Error::SwitchFailed(SwitchFailure::CreateLink { .. }))
    }
}

/// How a switch failed, split by whether the previous link survived.
#[derive(Debug, Error)]
pub enum SwitchFailure {
    #[error("cannot remove existing link {link}; the previous version is still active")]
    RemoveLink {
        link: PathBuf,
        source: jdkvm_fs::Error,
    },

    #[error("cannot create link {link} -> {target}; no version is currently active, retry the switch")]
    CreateLink {
        link: PathBuf,
        target: PathBuf,
        source: jdkvm_fs::Error,
    },
}

/// A failure downgraded to a warning because the store and link are still consistent.
#[derive(Debug)]
pub enum Warning {
    EnvSyncFailed(jdkvm_platform::Error),
    DeactivateFailed(Error),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EnvSyncFailed(e) => write!(f, "environment not updated: {e}"),
            Warning::DeactivateFailed(e) => write!(f, "active link not removed: {e}"),
        }
    }
}
