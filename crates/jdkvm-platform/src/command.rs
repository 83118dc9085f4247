use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::process::{Command as StdCommand, Output};

#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        Self {
            inner: StdCommand::new(&program),
            program,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    pub fn capture(mut self) -> Result<Output> {
        self.inner.output().map_err(|e| Error::CommandFailed {
            cmd: self.program.clone(),
            source: e,
        })
    }

    /// Run to completion and fail unless the exit status is success.
    pub fn run(self) -> Result<()> {
        self.stdout().map(|_| ())
    }

    /// Like [`Command::run`], returning what the command printed.
    pub fn stdout(self) -> Result<String> {
        let program = self.program.clone();
        let output = self.capture()?;
        if !output.status.success() {
            return Err(Error::CommandStatus {
                cmd: program,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_new() {
        let cmd = Command::new("echo");
        assert_eq!(cmd.program, "echo");
    }

    #[test]
    fn test_command_args() {
        let cmd = Command::new("setx").arg("JAVA_HOME").args(["C:\\jdk", "/M"]);
        let args: Vec<_> = cmd.inner.get_args().collect();
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_missing_program() {
        let result = Command::new("jdkvm-definitely-not-a-program").run();
        assert!(matches!(result, Err(Error::CommandFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_exit_status() {
        let result = Command::new("sh").args(["-c", "echo nope >&2; exit 3"]).run();
        match result {
            Err(Error::CommandStatus { stderr, .. }) => assert_eq!(stderr, "nope"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_returns_output() {
        let out = Command::new("sh").args(["-c", "echo hello"]).stdout().unwrap();
        assert_eq!(out, "hello\n");
    }
}
