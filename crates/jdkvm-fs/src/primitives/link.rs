//! Directory links: symlinks on Unix, junctions on Windows.
//!
//! Junctions need no elevation on Windows but cannot be repointed in place,
//! so there is no atomic replace here. Callers remove and recreate.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Create a link at `link` that resolves to the directory `target`.
pub fn create_dir_link(target: impl AsRef<Path>, link: impl AsRef<Path>) -> Result<()> {
    let target = target.as_ref();
    let link = link.as_ref();

    if let Some(parent) = link.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    #[cfg(unix)]
    let created = std::os::unix::fs::symlink(target, link);

    #[cfg(windows)]
    let created = junction::create(target, link);

    created.map_err(|e| Error::Link {
        link: link.to_path_buf(),
        target: target.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(link = %link.display(), target = %target.display(), "created directory link");
    Ok(())
}

/// Whether `path` itself is a directory link, regardless of what it points at.
pub fn is_dir_link(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let Ok(meta) = path.symlink_metadata() else {
        return false;
    };
    if meta.file_type().is_symlink() {
        return true;
    }

    #[cfg(windows)]
    {
        junction::exists(path).unwrap_or(false)
    }
    #[cfg(not(windows))]
    {
        false
    }
}

/// Read the target of the link at `link`.
///
/// Returns `Ok(None)` when nothing exists at `link` and [`Error::NotALink`]
/// when something that is not a link occupies it.
pub fn read_dir_link(link: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let link = link.as_ref();
    if link.symlink_metadata().is_err() {
        return Ok(None);
    }
    if !is_dir_link(link) {
        return Err(Error::NotALink {
            path: link.to_path_buf(),
        });
    }

    #[cfg(windows)]
    if !link.symlink_metadata().map(|m| m.file_type().is_symlink()).unwrap_or(false) {
        return junction::get_target(link).map(Some).map_err(|e| Error::Read {
            path: link.to_path_buf(),
            source: e,
        });
    }

    std::fs::read_link(link).map(Some).map_err(|e| Error::Read {
        path: link.to_path_buf(),
        source: e,
    })
}

/// Remove the link at `link` without touching what it points at.
///
/// Returns `Ok(false)` when there was nothing to remove. A real directory or
/// file at `link` is never deleted.
pub fn remove_dir_link(link: impl AsRef<Path>) -> Result<bool> {
    let link = link.as_ref();
    if link.symlink_metadata().is_err() {
        return Ok(false);
    }
    if !is_dir_link(link) {
        return Err(Error::NotALink {
            path: link.to_path_buf(),
        });
    }

    // A directory symlink or junction is removed as a directory on Windows.
    #[cfg(windows)]
    let removed = std::fs::remove_dir(link);

    #[cfg(not(windows))]
    let removed = std::fs::remove_file(link);

    removed.map_err(|e| Error::Remove {
        path: link.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(link = %link.display(), "removed directory link");
    Ok(true)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_and_read_link() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("store/17");
        let link = dir.path().join("current");
        std::fs::create_dir_all(&target).unwrap();

        create_dir_link(&target, &link).unwrap();
        assert!(is_dir_link(&link));
        assert_eq!(read_dir_link(&link).unwrap(), Some(target));
    }

    #[test]
    fn test_read_missing_link() {
        let dir = tempdir().unwrap();
        assert_eq!(read_dir_link(dir.path().join("current")).unwrap(), None);
    }

    #[test]
    fn test_read_dangling_link() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("gone");
        let link = dir.path().join("current");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(is_dir_link(&link));
        assert_eq!(read_dir_link(&link).unwrap(), Some(target));
    }

    #[test]
    fn test_real_directory_is_not_a_link() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("current");
        std::fs::create_dir_all(&real).unwrap();

        assert!(!is_dir_link(&real));
        assert!(matches!(read_dir_link(&real), Err(Error::NotALink { .. })));
        assert!(matches!(remove_dir_link(&real), Err(Error::NotALink { .. })));
        assert!(real.is_dir());
    }

    #[test]
    fn test_remove_link_keeps_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("store/21");
        let link = dir.path().join("current");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("release"), "21").unwrap();
        create_dir_link(&target, &link).unwrap();

        assert!(remove_dir_link(&link).unwrap());
        assert!(link.symlink_metadata().is_err());
        assert!(target.join("release").exists());
        assert!(!remove_dir_link(&link).unwrap());
    }

    #[test]
    fn test_create_link_over_existing_fails() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("store/21");
        let link = dir.path().join("current");
        std::fs::create_dir_all(&target).unwrap();
        create_dir_link(&target, &link).unwrap();

        let err = create_dir_link(&target, &link).unwrap_err();
        assert!(matches!(err, Error::Link { .. }));
    }
}
