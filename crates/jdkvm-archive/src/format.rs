use std::io::{self, Read, Seek};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar(TarCompress),
}

/// Compression codec for tar archives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TarCompress {
    None,
    Gzip,
}

const TAR_MAGIC_OFFSET: usize = 257;

pub fn detect_format(data: &[u8]) -> Option<ArchiveFormat> {
    match data {
        [0x50, 0x4B, 0x03, 0x04, ..] | [0x50, 0x4B, 0x05, 0x06, ..] => Some(ArchiveFormat::Zip),
        [0x1F, 0x8B, ..] => Some(ArchiveFormat::Tar(TarCompress::Gzip)),
        _ if is_tar_header(data) => Some(ArchiveFormat::Tar(TarCompress::None)),
        _ => None,
    }
}

fn is_tar_header(data: &[u8]) -> bool {
    data.len() >= TAR_MAGIC_OFFSET + 5 && &data[TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + 5] == b"ustar"
}

/// Sniff the format from the first block of `reader`, leaving it rewound.
pub fn detect_from_reader<R: Read + Seek>(reader: &mut R) -> io::Result<Option<ArchiveFormat>> {
    let mut header = Vec::with_capacity(512);
    reader.by_ref().take(512).read_to_end(&mut header)?;
    reader.rewind()?;
    Ok(detect_format(&header))
}
