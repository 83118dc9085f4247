use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::{Error, Result, ScratchFile};

#[derive(Clone, Copy, Debug, Default)]
pub struct AtomicWriteOptions {
    pub permissions: Option<u32>,
    pub sync: bool,
}

impl AtomicWriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unix mode applied to the file before it becomes visible. Ignored elsewhere.
    pub fn permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

/// Write `content` to `path` so readers observe either the old or the new file.
///
/// The content lands in a hidden sibling first and is renamed over `path`.
/// Missing parent directories are created.
pub fn atomic_write(
    path: impl AsRef<Path>,
    content: &[u8],
    options: AtomicWriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| Error::Write {
        path: parent.to_path_buf(),
        source: e,
    })?;

    let name = path.file_name().unwrap_or_default().to_string_lossy();
    let tmp = ScratchFile::new(parent.join(format!(".{name}.{}.tmp", std::process::id())));
    write_sibling(tmp.path(), content, options).map_err(|e| Error::Write {
        path: tmp.path().to_path_buf(),
        source: e,
    })?;

    fs::rename(tmp.path(), path).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "atomic write");
    Ok(())
}

fn write_sibling(tmp: &Path, content: &[u8], options: AtomicWriteOptions) -> io::Result<()> {
    let mut file = File::create(tmp)?;
    file.write_all(content)?;

    #[cfg(unix)]
    if let Some(mode) = options.permissions {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(mode))?;
    }
    if options.sync {
        file.sync_all()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jdkvm.json");
        atomic_write(&path, b"{}", AtomicWriteOptions::new()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"{}");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jdkvm.json");
        fs::write(&path, "old").unwrap();
        atomic_write(&path, b"new", AtomicWriteOptions::new().sync(true)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/env.sh");
        atomic_write(&path, b"export A=1\n", AtomicWriteOptions::new()).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jdkvm.json");
        atomic_write(&path, b"{}", AtomicWriteOptions::new()).unwrap();
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("jdkvm.json")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_with_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("env.sh");
        atomic_write(&path, b"data", AtomicWriteOptions::new().permissions(0o755)).unwrap();
        let metadata = fs::metadata(&path).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o755);
    }
}
