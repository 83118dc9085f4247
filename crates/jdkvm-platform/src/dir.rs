use std::env;
use std::path::PathBuf;

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

pub fn user_config() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        user_home().map(|p| p.join("Library/Application Support"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| user_home().map(|p| p.join(".config")))
    }
}

pub fn user_data() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("LOCALAPPDATA").map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        user_home().map(|p| p.join("Library/Application Support"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| user_home().map(|p| p.join(".local/share")))
    }
}

/// `%ProgramFiles%` on Windows, where a machine-wide `JAVA_HOME` usually lives.
pub fn program_files() -> Option<PathBuf> {
    env::var_os("ProgramFiles").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_dirs_are_absolute_when_present() {
        for dir in [user_home(), user_config(), user_data()].into_iter().flatten() {
            assert!(dir.is_absolute() || dir.as_os_str().is_empty());
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_user_data_under_home_by_default() {
        if env::var_os("XDG_DATA_HOME").is_none() {
            if let (Some(data), Some(home)) = (user_data(), user_home()) {
                assert!(data.starts_with(home));
            }
        }
    }
}
