//! Collaborators the lifecycle drives but does not implement.

use std::path::{Path, PathBuf};

use jdkvm_archive::Extractor;
use jdkvm_fetch::Fetcher;

/// Retrieves a distribution archive to local disk.
pub trait ArchiveFetcher {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Place the archive for `name` inside `dest_dir` and return its path.
    fn fetch(&self, dest_dir: &Path, name: &str, url: &str) -> Result<PathBuf, Self::Error>;
}

/// Unpacks an archive into a directory.
///
/// On failure `dest` may hold partial output; the caller deletes it wholesale.
pub trait ArchiveExtractor {
    type Error: std::error::Error + Send + Sync + 'static;

    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), Self::Error>;
}

impl ArchiveFetcher for Fetcher {
    type Error = jdkvm_fetch::Error;

    fn fetch(&self, dest_dir: &Path, name: &str, url: &str) -> Result<PathBuf, Self::Error> {
        Fetcher::fetch(self, dest_dir, name, url)
    }
}

impl ArchiveExtractor for Extractor {
    type Error = jdkvm_archive::Error;

    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), Self::Error> {
        Extractor::extract(self, archive, dest).map(|_| ())
    }
}
