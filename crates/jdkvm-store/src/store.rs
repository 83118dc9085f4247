use std::path::{Component, Path, PathBuf};

use jdkvm_fs::{RenameOptions, rename_dir};

use crate::error::{Error, Result};

/// Directory holding one subdirectory per installed version.
#[derive(Clone, Debug)]
pub struct VersionStore {
    root: PathBuf,
}

impl VersionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn is_installed(&self, name: &str) -> bool {
        is_valid_name(name) && self.path(name).is_dir()
    }

    /// Installed version names in directory order. A missing root is an empty store.
    pub fn list_installed(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(root = %self.root.display(), error = %e, "cannot read store");
                return Vec::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }

    /// Move a fully extracted directory into the store under `name`.
    ///
    /// A single rename, so the final path is never partially populated.
    /// Fails if `name` exists or `staged` is on another volume.
    pub fn publish(&self, staged: &Path, name: &str) -> Result<PathBuf> {
        check_name(name)?;
        let dest = self.path(name);
        std::fs::create_dir_all(&self.root).map_err(|e| Error::InstallFailed {
            name: name.to_string(),
            path: self.root.clone(),
            source: jdkvm_fs::Error::Write {
                path: self.root.clone(),
                source: e,
            },
        })?;

        rename_dir(staged, &dest, RenameOptions::default()).map_err(|e| Error::InstallFailed {
            name: name.to_string(),
            path: dest.clone(),
            source: e,
        })?;
        tracing::info!(name, path = %dest.display(), "published version");
        Ok(dest)
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        if !self.is_installed(name) {
            return Err(Error::NotInstalled {
                name: name.to_string(),
            });
        }
        let path = self.path(name);
        std::fs::remove_dir_all(&path).map_err(|e| Error::RemoveFailed {
            name: name.to_string(),
            path: path.clone(),
            source: jdkvm_fs::Error::Remove {
                path: path.clone(),
                source: e,
            },
        })?;
        tracing::info!(name, path = %path.display(), "removed version");
        Ok(())
    }
}

/// A version name must be exactly one normal path component.
pub fn is_valid_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.ends_with(['/', '\\'])
}

pub(crate) fn check_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::InvalidName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn staged(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::create_dir_all(path.join("bin")).unwrap();
        std::fs::write(path.join("release"), "JAVA_VERSION=\"21\"").unwrap();
        path
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let store = VersionStore::new(dir.path().join("store"));
        assert!(store.list_installed().is_empty());
        assert!(!store.is_installed("21"));
    }

    #[test]
    fn test_publish_makes_version_visible() {
        let dir = tempdir().unwrap();
        let store = VersionStore::new(dir.path().join("store"));
        let src = staged(dir.path(), "21_temp");

        let dest = store.publish(&src, "21").unwrap();

        assert_eq!(dest, store.path("21"));
        assert!(store.is_installed("21"));
        assert!(dest.join("release").is_file());
        assert!(!src.exists());
        assert_eq!(store.list_installed(), vec!["21".to_string()]);
    }

    #[test]
    fn test_publish_refuses_existing() {
        let dir = tempdir().unwrap();
        let store = VersionStore::new(dir.path().join("store"));
        std::fs::create_dir_all(store.path("21")).unwrap();
        let src = staged(dir.path(), "21_temp");

        let err = store.publish(&src, "21").unwrap_err();

        assert!(matches!(err, Error::InstallFailed { .. }));
        assert!(src.exists());
        assert!(!store.path("21").join("release").exists());
    }

    #[test]
    fn test_list_skips_files() {
        let dir = tempdir().unwrap();
        let store = VersionStore::new(dir.path());
        std::fs::create_dir(store.path("17")).unwrap();
        std::fs::write(store.path("notes.txt"), "").unwrap();

        assert_eq!(store.list_installed(), vec!["17".to_string()]);
        assert!(!store.is_installed("notes.txt"));
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let store = VersionStore::new(dir.path());
        std::fs::create_dir_all(store.path("17").join("lib")).unwrap();

        store.remove("17").unwrap();

        assert!(!store.is_installed("17"));
        assert!(matches!(store.remove("17"), Err(Error::NotInstalled { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_failure_names_version_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = VersionStore::new(dir.path());
        let lib = store.path("17").join("lib");
        std::fs::create_dir_all(&lib).unwrap();
        std::fs::write(lib.join("modules"), "x").unwrap();
        std::fs::set_permissions(&lib, std::fs::Permissions::from_mode(0o555)).unwrap();
        // Root ignores directory permissions.
        let enforced = std::fs::write(lib.join(".writable"), "").is_err();

        let result = store.remove("17");
        std::fs::set_permissions(&lib, std::fs::Permissions::from_mode(0o755)).unwrap();
        if !enforced {
            return;
        }

        match result {
            Err(Error::RemoveFailed { name, path, .. }) => {
                assert_eq!(name, "17");
                assert_eq!(path, store.path("17"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(store.is_installed("17"));
    }

    #[test]
    fn test_version_names() {
        assert!(is_valid_name("21"));
        assert!(is_valid_name("17.0.2+8"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name(".."));
        assert!(!is_valid_name("../21"));
        assert!(!is_valid_name("a/b"));
        assert!(!is_valid_name("/21"));
    }

    #[test]
    fn test_invalid_name_never_installed() {
        let dir = tempdir().unwrap();
        let store = VersionStore::new(dir.path().join("store"));
        std::fs::create_dir_all(dir.path().join("other")).unwrap();
        assert!(!store.is_installed("../other"));
        assert!(matches!(
            store.publish(dir.path(), "../other"),
            Err(Error::InvalidName { .. })
        ));
    }
}
