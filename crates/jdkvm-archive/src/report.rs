use std::path::PathBuf;

use crate::format::ArchiveFormat;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink { target: PathBuf },
    Hardlink { target: PathBuf },
}

#[derive(Clone, Debug)]
pub struct ArchiveReport {
    pub format: ArchiveFormat,
    pub entry_count: usize,
    pub total_bytes: u64,
}

impl ArchiveReport {
    pub(crate) fn new(format: ArchiveFormat) -> Self {
        Self {
            format,
            entry_count: 0,
            total_bytes: 0,
        }
    }

    pub(crate) fn record(&mut self, size: u64) {
        self.entry_count += 1;
        self.total_bytes += size;
    }
}
