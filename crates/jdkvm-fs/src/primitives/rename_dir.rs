use crate::{Error, Result};
use std::io;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
pub struct RenameOptions {
    pub retry_count: u32,
    pub retry_delay: Duration,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            retry_count: 5,
            retry_delay: Duration::from_millis(100),
        }
    }
}

impl RenameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }
}

/// Move the directory `src` to `dest` with a single rename.
///
/// Fails with [`Error::AlreadyExists`] when anything is present at `dest`; the
/// destination is never replaced. A rename across volumes is reported as
/// [`Error::CrossesDevices`]; there is no copy fallback.
///
/// On Windows, transient sharing violations (antivirus, indexers) are retried
/// with a linear backoff.
pub fn rename_dir(src: impl AsRef<Path>, dest: impl AsRef<Path>, options: RenameOptions) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    if dest.symlink_metadata().is_ok() {
        return Err(Error::AlreadyExists {
            path: dest.to_path_buf(),
        });
    }

    let mut attempts = 0;
    loop {
        match std::fs::rename(src, dest) {
            Ok(()) => {
                tracing::debug!(from = %src.display(), to = %dest.display(), "renamed directory");
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                return Err(Error::CrossesDevices {
                    from: src.to_path_buf(),
                    to: dest.to_path_buf(),
                });
            }
            Err(e) => {
                attempts += 1;
                if !is_transient(&e) || attempts >= options.retry_count {
                    return Err(Error::Rename {
                        from: src.to_path_buf(),
                        to: dest.to_path_buf(),
                        source: e,
                    });
                }
                tracing::debug!(attempt = attempts, error = %e, "retrying directory rename");
                std::thread::sleep(options.retry_delay * attempts);
            }
        }
    }
}

#[cfg(windows)]
fn is_transient(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::PermissionDenied
}

#[cfg(not(windows))]
fn is_transient(_e: &io::Error) -> bool {
    false
}
