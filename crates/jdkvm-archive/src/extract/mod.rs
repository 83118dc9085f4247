//! Archive extraction for ZIP and TAR formats.
//!
//! Entries are written straight into the destination as they are read. A
//! failure part-way leaves a partially populated destination behind; callers
//! extract into a disposable directory and discard it on error.
//!
//! **Unix**: file mode bits from the archive are applied.
//! **Windows**: mode bits are ignored.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::format::{self, ArchiveFormat};
use crate::options::ExtractOptions;
use crate::report::{ArchiveReport, EntryKind};
use crate::sanitize::{sanitize_path, sanitize_symlink_target};

#[cfg(feature = "tar")]
mod tar;
#[cfg(feature = "zip")]
mod zip;

/// Extracts distribution archives into a directory.
#[derive(Clone, Copy, Debug, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn extract(&self, archive: &Path, destination: &Path) -> Result<ArchiveReport> {
        std::fs::create_dir_all(destination).map_err(|e| Error::DirectoryCreationFailed {
            path: destination.to_path_buf(),
            source: e,
        })?;
        let report = extract_file(archive, destination, &self.options)?;
        tracing::info!(
            archive = %archive.display(),
            entries = report.entry_count,
            bytes = report.total_bytes,
            "extracted archive"
        );
        Ok(report)
    }
}

/// Extract the archive at `path`, detecting its format from content.
pub fn extract_file(path: &Path, destination: &Path, options: &ExtractOptions) -> Result<ArchiveReport> {
    let file = File::open(path).map_err(|e| Error::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    extract_from_reader(BufReader::new(file), destination, options).map_err(|e| match e {
        Error::UnsupportedFormat { .. } => Error::UnsupportedFormat {
            path: path.to_path_buf(),
        },
        other => other,
    })
}

/// Extract archive with automatic format detection.
pub fn extract_from_reader<R: Read + Seek>(
    mut reader: R,
    destination: &Path,
    options: &ExtractOptions,
) -> Result<ArchiveReport> {
    let format = format::detect_from_reader(&mut reader)
        .map_err(Error::corrupted)?
        .ok_or_else(|| Error::UnsupportedFormat {
            path: destination.to_path_buf(),
        })?;
    tracing::debug!(?format, destination = %destination.display(), "extracting");

    let mut writer = EntryWriter::new(destination, options, format);
    match format {
        #[cfg(feature = "zip")]
        ArchiveFormat::Zip => zip::extract(reader, &mut writer)?,
        #[cfg(feature = "tar")]
        ArchiveFormat::Tar(codec) => tar::extract(reader, codec, &mut writer)?,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(Error::UnsupportedFormat {
                path: destination.to_path_buf(),
            });
        }
    }
    Ok(writer.report)
}

/// Writes sanitized entries below one base directory.
pub(crate) struct EntryWriter<'a> {
    base: &'a Path,
    options: &'a ExtractOptions,
    report: ArchiveReport,
}

impl<'a> EntryWriter<'a> {
    fn new(base: &'a Path, options: &'a ExtractOptions, format: ArchiveFormat) -> Self {
        Self {
            base,
            options,
            report: ArchiveReport::new(format),
        }
    }

    pub(crate) fn write(
        &mut self,
        original: &Path,
        kind: EntryKind,
        mode: Option<u32>,
        size: u64,
        reader: &mut dyn Read,
    ) -> Result<()> {
        let Some(target) = sanitize_path(original, self.base, self.options.strip_components)? else {
            return Ok(());
        };

        match kind {
            EntryKind::Directory => ensure_directory(&target)?,
            EntryKind::File => {
                write_file(reader, &target, size)?;
                apply_mode(&target, mode)?;
            }
            EntryKind::Symlink { target: link_target } => {
                let link_target = sanitize_symlink_target(&link_target, &target, self.base)?;
                write_symlink(&link_target, &target)?;
            }
            EntryKind::Hardlink { target: source } => {
                let source = sanitize_path(&source, self.base, self.options.strip_components)?
                    .ok_or(Error::InvalidPath)?;
                write_hardlink(&source, &target)?;
            }
        }

        self.report.record(size);
        Ok(())
    }
}

fn ensure_directory(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => ensure_directory(parent),
        None => Ok(()),
    }
}

fn write_file(reader: &mut dyn Read, target: &Path, expected: u64) -> Result<()> {
    ensure_parent(target)?;
    let mut file = File::create(target).map_err(|e| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source: e,
    })?;
    let written = io::copy(reader, &mut file).map_err(|e| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source: e,
    })?;
    // Truncated streams can end an entry early without a read error.
    if written < expected {
        return Err(Error::ExtractionFailed {
            path: target.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("entry ended after {written} of {expected} bytes"),
            ),
        });
    }
    Ok(())
}

fn write_hardlink(source: &Path, target: &Path) -> Result<()> {
    ensure_parent(target)?;
    if std::fs::hard_link(source, target).is_ok() {
        return Ok(());
    }
    std::fs::copy(source, target)
        .map(|_| ())
        .map_err(|e| Error::ExtractionFailed {
            path: target.to_path_buf(),
            source: e,
        })
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let Some(mode) = mode.map(|m| m & 0o7777).filter(|m| *m != 0) else {
        return Ok(());
    };
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
        Error::ExtractionFailed {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn write_symlink(target: &Path, link: &Path) -> Result<()> {
    ensure_parent(link)?;
    std::os::unix::fs::symlink(target, link).map_err(|e| Error::SymlinkCreationFailed {
        target: target.to_path_buf(),
        link: link.to_path_buf(),
        source: e,
    })
}

#[cfg(windows)]
fn write_symlink(target: &Path, link: &Path) -> Result<()> {
    use std::os::windows::fs;

    ensure_parent(link)?;
    let resolved: PathBuf = link.parent().map(|p| p.join(target)).unwrap_or_else(|| target.to_path_buf());
    let created = if resolved.is_dir() {
        fs::symlink_dir(target, link)
    } else {
        fs::symlink_file(target, link)
    };
    created.map_err(|e| Error::SymlinkCreationFailed {
        target: target.to_path_buf(),
        link: link.to_path_buf(),
        source: e,
    })
}

pub(crate) fn owned_path(path: impl AsRef<Path>) -> PathBuf {
    path.as_ref().to_path_buf()
}
