//! Keeping `JAVA_HOME` and `PATH` pointed at the active runtime.
//!
//! Child processes only see variables their parent shell exports, so the
//! value has to be persisted somewhere a shell reads it: the machine
//! environment on Windows, a sourced script elsewhere.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use jdkvm_fs::{AtomicWriteOptions, atomic_write};

use crate::command::Command;
use crate::env::PathModifier;
use crate::error::{Error, Result};

pub const JAVA_HOME: &str = "JAVA_HOME";

/// Variables derived from a runtime root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeEnv {
    pub java_home: PathBuf,
}

impl RuntimeEnv {
    pub fn new(java_home: impl Into<PathBuf>) -> Self {
        Self {
            java_home: java_home.into(),
        }
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.java_home.join("bin")
    }

    /// `PATH` with the runtime's `bin` directory in front.
    pub fn path_value(&self, current: PathModifier) -> Result<OsString> {
        current.prepend(self.bin_dir()).build()
    }
}

/// Publishes the runtime location to downstream shells.
pub trait EnvSync {
    /// Publish `JAVA_HOME` and put the runtime's `bin` on `PATH`.
    fn sync(&self, env: &RuntimeEnv) -> Result<()>;

    /// Publish `JAVA_HOME` only. Runs on every switch, after
    /// [`EnvSync::sync`] has set up `PATH` once.
    fn sync_home(&self, env: &RuntimeEnv) -> Result<()> {
        self.sync(env)
    }
}

impl<T: EnvSync + ?Sized> EnvSync for Box<T> {
    fn sync(&self, env: &RuntimeEnv) -> Result<()> {
        (**self).sync(env)
    }

    fn sync_home(&self, env: &RuntimeEnv) -> Result<()> {
        (**self).sync_home(env)
    }
}

/// Writes a POSIX shell script exporting `JAVA_HOME` and `PATH`.
#[derive(Clone, Debug)]
pub struct ScriptEnv {
    path: PathBuf,
}

impl ScriptEnv {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn render(env: &RuntimeEnv) -> String {
        let home = shell_quote(&env.java_home.to_string_lossy());
        let bin = shell_quote(&env.bin_dir().to_string_lossy());
        format!(
            "# Generated by jdkvm. Source this file from your shell profile.\n\
             export {JAVA_HOME}=\"{home}\"\n\
             case \":$PATH:\" in\n  *\":{bin}:\"*) ;;\n  *) export PATH=\"{bin}:$PATH\" ;;\nesac\n"
        )
    }
}

impl EnvSync for ScriptEnv {
    fn sync(&self, env: &RuntimeEnv) -> Result<()> {
        let script = Self::render(env);
        atomic_write(&self.path, script.as_bytes(), AtomicWriteOptions::new().permissions(0o644))?;
        tracing::info!(script = %self.path.display(), java_home = %env.java_home.display(), "updated environment script");
        Ok(())
    }
}

/// Escape for the inside of a double-quoted POSIX shell string.
fn shell_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

const MACHINE_ENV_KEY: &str = r"HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

/// `setx` silently truncates anything longer.
const SETX_MAX_LEN: usize = 1024;

/// Sets machine-wide variables through `setx /M`. Needs an elevated prompt.
///
/// `PATH` is rebuilt from the machine value in the registry, never from the
/// process environment, which also carries user and session entries.
#[derive(Clone, Debug, Default)]
pub struct SystemEnv;

impl SystemEnv {
    fn machine_path() -> Result<OsString> {
        let out = Command::new("reg")
            .args(["query", MACHINE_ENV_KEY, "/v", "Path"])
            .stdout()?;
        Ok(parse_reg_value(&out, "Path").unwrap_or_default().into())
    }
}

impl EnvSync for SystemEnv {
    fn sync(&self, env: &RuntimeEnv) -> Result<()> {
        self.sync_home(env)?;
        let machine = PathModifier::from_value(&Self::machine_path()?);
        if machine.contains(&env.bin_dir()) {
            tracing::debug!(bin = %env.bin_dir().display(), "system PATH already set");
            return Ok(());
        }
        setx("PATH", env.path_value(machine)?)?;
        tracing::info!(bin = %env.bin_dir().display(), "added runtime to system PATH");
        Ok(())
    }

    fn sync_home(&self, env: &RuntimeEnv) -> Result<()> {
        setx(JAVA_HOME, env.java_home.as_os_str().to_os_string())?;
        tracing::info!(java_home = %env.java_home.display(), "updated system environment");
        Ok(())
    }
}

fn setx(key: &str, value: OsString) -> Result<()> {
    check_setx_len(key, &value)?;
    Command::new("cmd")
        .args(["/C", "setx", key])
        .arg(value)
        .arg("/M")
        .run()
}

fn check_setx_len(key: &str, value: &OsStr) -> Result<()> {
    let len = value.to_string_lossy().chars().count();
    if len > SETX_MAX_LEN {
        return Err(Error::ValueTooLong {
            key: key.to_string(),
            len,
            max: SETX_MAX_LEN,
        });
    }
    Ok(())
}

/// Pick the data of value `name` out of `reg query` output, whose value
/// lines read `<name>    <REG_TYPE>    <data>`.
fn parse_reg_value(output: &str, name: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (key, rest) = line.trim_start().split_once(char::is_whitespace)?;
        if !key.eq_ignore_ascii_case(name) {
            return None;
        }
        let rest = rest.trim_start();
        let (kind, data) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        kind.starts_with("REG_").then(|| data.trim().to_string())
    })
}

/// The environment sync for the current platform.
pub fn default_env_sync(script: impl Into<PathBuf>) -> Box<dyn EnvSync> {
    if cfg!(windows) {
        Box::new(SystemEnv)
    } else {
        Box::new(ScriptEnv::new(script))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_script() {
        let env = RuntimeEnv::new("/home/me/.local/share/jdkvm/current");
        let script = ScriptEnv::render(&env);
        assert!(script.contains("export JAVA_HOME=\"/home/me/.local/share/jdkvm/current\"\n"));
        assert!(script.contains("export PATH=\"/home/me/.local/share/jdkvm/current/bin:$PATH\""));
    }

    #[test]
    fn test_render_escapes_shell_characters() {
        let env = RuntimeEnv::new("/opt/$jdk \"x\"");
        let script = ScriptEnv::render(&env);
        assert!(script.contains("export JAVA_HOME=\"/opt/\\$jdk \\\"x\\\"\""));
    }

    #[test]
    fn test_script_env_sync_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sync = ScriptEnv::new(dir.path().join("env.sh"));
        sync.sync(&RuntimeEnv::new("/opt/jdk")).unwrap();
        let written = std::fs::read_to_string(sync.path()).unwrap();
        assert_eq!(written, ScriptEnv::render(&RuntimeEnv::new("/opt/jdk")));
    }

    #[test]
    fn test_path_value_prepends_bin() {
        let current = PathModifier::from_value(&std::env::join_paths(["/usr/bin"]).unwrap());
        let value = RuntimeEnv::new("/opt/jdk").path_value(current).unwrap();
        let entries: Vec<_> = std::env::split_paths(&value).collect();
        assert_eq!(entries, [PathBuf::from("/opt/jdk/bin"), PathBuf::from("/usr/bin")]);
    }

    #[test]
    fn test_script_env_sync_home_writes_same_script() {
        let dir = tempfile::tempdir().unwrap();
        let sync = ScriptEnv::new(dir.path().join("env.sh"));
        sync.sync_home(&RuntimeEnv::new("/opt/jdk")).unwrap();
        let written = std::fs::read_to_string(sync.path()).unwrap();
        assert_eq!(written, ScriptEnv::render(&RuntimeEnv::new("/opt/jdk")));
    }

    #[test]
    fn test_parse_reg_value() {
        let out = "\r\nHKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control\\Session Manager\\Environment\r\n    \
                   Path    REG_EXPAND_SZ    %SystemRoot%\\system32;C:\\Program Files\\Git\\cmd\r\n\r\n";
        assert_eq!(
            parse_reg_value(out, "Path").as_deref(),
            Some("%SystemRoot%\\system32;C:\\Program Files\\Git\\cmd")
        );
        assert_eq!(parse_reg_value(out, "JAVA_HOME"), None);
    }

    #[test]
    fn test_parse_reg_value_empty_data() {
        assert_eq!(parse_reg_value("    Path    REG_SZ    \r\n", "path").as_deref(), Some(""));
    }

    #[test]
    fn test_setx_rejects_long_values() {
        let long = OsString::from("x".repeat(SETX_MAX_LEN + 1));
        match check_setx_len("PATH", &long) {
            Err(Error::ValueTooLong { key, len, max }) => {
                assert_eq!(key, "PATH");
                assert_eq!(len, SETX_MAX_LEN + 1);
                assert_eq!(max, SETX_MAX_LEN);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(check_setx_len("PATH", OsStr::new(&"x".repeat(SETX_MAX_LEN))).is_ok());
    }
}
