use std::io::Read;

use flate2::read::GzDecoder;

use super::{EntryWriter, owned_path};
use crate::error::{Error, Result};
use crate::format::TarCompress;
use crate::report::EntryKind;

pub(super) fn extract<R: Read>(
    reader: R,
    codec: TarCompress,
    writer: &mut EntryWriter<'_>,
) -> Result<()> {
    let decoder = match codec {
        TarCompress::None => Decoder::Passthrough(reader),
        TarCompress::Gzip => Decoder::Gzip(Box::new(GzDecoder::new(reader))),
    };
    let mut archive = tar::Archive::new(decoder);

    for entry in archive.entries().map_err(Error::corrupted)? {
        let mut entry = entry.map_err(Error::corrupted)?;
        let path = entry.path().map_err(|_| Error::InvalidPath)?.into_owned();

        let (kind, mode, size) = {
            let header = entry.header();
            let entry_type = header.entry_type();
            let link_name = || -> Result<std::path::PathBuf> {
                match entry.link_name() {
                    Ok(Some(target)) => Ok(owned_path(target)),
                    _ => Err(Error::InvalidPath),
                }
            };

            let kind = if entry_type.is_dir() {
                EntryKind::Directory
            } else if entry_type.is_symlink() {
                EntryKind::Symlink { target: link_name()? }
            } else if entry_type.is_hard_link() {
                EntryKind::Hardlink { target: link_name()? }
            } else if entry_type.is_file() || entry_type == tar::EntryType::Continuous {
                EntryKind::File
            } else {
                tracing::debug!(path = %path.display(), ?entry_type, "skipping tar entry");
                continue;
            };
            (kind, header.mode().ok(), header.size().unwrap_or(0))
        };

        writer.write(&path, kind, mode, size, &mut entry)?;
    }

    Ok(())
}

/// Decoder wrapper for tar decompression.
enum Decoder<R> {
    Passthrough(R),
    Gzip(Box<GzDecoder<R>>),
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Passthrough(r) => r.read(buf),
            Self::Gzip(d) => d.read(buf),
        }
    }
}
