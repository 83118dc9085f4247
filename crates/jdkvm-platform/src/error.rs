use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("command failed: {cmd}, source: {source}")]
    CommandFailed { cmd: String, source: std::io::Error },

    #[error("command `{cmd}` exited with {status}: {stderr}")]
    CommandStatus {
        cmd: String,
        status: String,
        stderr: String,
    },

    #[error("PATH entry contains a separator: {0}")]
    InvalidPathEntry(String),

    #[error("{key} would be {len} characters, setx keeps at most {max}")]
    ValueTooLong { key: String, len: usize, max: usize },

    #[error("failed to write environment script: {0}")]
    Script(#[from] jdkvm_fs::Error),
}
