use std::io::{Read, Seek};

use super::{EntryWriter, owned_path};
use crate::error::{Error, Result};
use crate::report::EntryKind;

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

pub(super) fn extract<R: Read + Seek>(reader: R, writer: &mut EntryWriter<'_>) -> Result<()> {
    let mut archive = zip::ZipArchive::new(reader).map_err(Error::corrupted)?;

    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(Error::corrupted)?;
        let path = owned_path(file.name());
        let size = file.size();
        let mode = file.unix_mode();

        let kind = if file.is_dir() {
            EntryKind::Directory
        } else if mode.is_some_and(|m| m & S_IFMT == S_IFLNK) {
            // Symlink entries store their target as the file content.
            let mut target = String::new();
            file.read_to_string(&mut target).map_err(Error::corrupted)?;
            EntryKind::Symlink {
                target: owned_path(target),
            }
        } else {
            EntryKind::File
        };

        writer.write(&path, kind, mode, size, &mut file)?;
    }

    Ok(())
}
