use crate::error::{Error, Result};
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

fn paths_equal(p1: &Path, p2: &Path) -> bool {
    fn normalize(p: &Path) -> String {
        let s = p.to_string_lossy();
        let s = s.trim_end_matches(['/', '\\']);
        if cfg!(windows) {
            s.replace('/', "\\").to_lowercase()
        } else {
            s.to_string()
        }
    }
    normalize(p1) == normalize(p2)
}

/// Builder for a `PATH`-style value that keeps entries unique.
#[derive(Debug, Clone, Default)]
pub struct PathModifier {
    paths: Vec<PathBuf>,
}

impl PathModifier {
    /// Start from the current process `PATH`.
    pub fn from_env() -> Self {
        Self {
            paths: path_env().unwrap_or_default(),
        }
    }

    pub fn from_value(value: &OsStr) -> Self {
        Self {
            paths: env::split_paths(value).collect(),
        }
    }

    /// Move `path` to the front, dropping any existing copy.
    pub fn prepend(mut self, path: PathBuf) -> Self {
        self.paths.retain(|p| !paths_equal(p, &path));
        self.paths.insert(0, path);
        self
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| paths_equal(p, path))
    }

    pub fn build(self) -> Result<OsString> {
        env::join_paths(&self.paths).map_err(|e| Error::InvalidPathEntry(e.to_string()))
    }
}

pub fn path_env() -> Option<Vec<PathBuf>> {
    env::var_os("PATH").map(|val| env::split_paths(&val).collect())
}

pub fn is_in_path(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    !path.as_os_str().is_empty() && PathModifier::from_env().contains(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifier(entries: &[&str]) -> PathModifier {
        let value = env::join_paths(entries).unwrap();
        PathModifier::from_value(&value)
    }

    fn entries(m: PathModifier) -> Vec<PathBuf> {
        env::split_paths(&m.build().unwrap()).collect()
    }

    #[test]
    fn test_path_modifier_prepend() {
        let m = modifier(&["/usr/bin", "/bin"]).prepend(PathBuf::from("/opt/jdk/bin"));
        assert_eq!(
            entries(m),
            [
                PathBuf::from("/opt/jdk/bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin")
            ]
        );
    }

    #[test]
    fn test_path_modifier_prepend_moves_existing_to_front() {
        let m = modifier(&["/usr/bin", "/opt/jdk/bin/", "/bin"]).prepend(PathBuf::from("/opt/jdk/bin"));
        assert_eq!(
            entries(m),
            [
                PathBuf::from("/opt/jdk/bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin")
            ]
        );
    }

    #[test]
    fn test_path_modifier_contains() {
        let m = modifier(&["/usr/bin", "/opt/jdk/bin/"]);
        assert!(m.contains(Path::new("/opt/jdk/bin")));
        assert!(m.contains(Path::new("/usr/bin")));
        assert!(!m.contains(Path::new("/bin")));
    }

    #[test]
    fn test_paths_equal_normalization() {
        assert!(paths_equal(Path::new("/path/"), Path::new("/path")));
        assert!(!paths_equal(Path::new("/path1"), Path::new("/path2")));
        #[cfg(windows)]
        assert!(paths_equal(Path::new("C:\\Path"), Path::new("c:/path")));
    }

    #[test]
    fn test_is_in_path_empty() {
        assert!(!is_in_path(""));
    }
}
