//! External command execution.
//!
//! Commands are described by an [`Invocation`] and executed by a
//! [`CommandRunner`]. The system runner attaches the child's stdout and
//! stderr to ours and enforces a timeout; tests substitute a recording
//! runner.

use crate::log;
use std::{
    ffi::OsString,
    fmt, io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};
use thiserror::Error;

/// Poll interval while waiting for a child with a deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ============================================================================
// Types
// ============================================================================

/// A fully-resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program followed by its fixed leading arguments (e.g. `["firebase"]`).
    pub command: Vec<String>,
    /// Trailing arguments (e.g. `["use", "my-project"]`).
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(command: &[String], args: &[String], cwd: &Path) -> Self {
        Self {
            command: command.to_vec(),
            args: args.iter().filter(|a| !a.is_empty()).cloned().collect(),
            cwd: cwd.to_path_buf(),
        }
    }

    /// Program name used in logs and errors.
    pub fn name(&self) -> &str {
        self.command.first().map_or("<empty>", String::as_str)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self
            .command
            .iter()
            .chain(&self.args)
            .map(String::as_str)
            .collect();
        f.write_str(&parts.join(" "))
    }
}

/// Failure to run an external command to successful completion.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("empty command")]
    Empty,

    #[error("failed to spawn `{name}`")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("`{name}` exited with {status}")]
    Exit { name: String, status: String },

    #[error("`{name}` timed out after {}", humantime::format_duration(.timeout.to_owned()))]
    Timeout { name: String, timeout: Duration },

    #[error("failed to wait for `{name}`")]
    Wait {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Executes invocations. Implementations block until the command finishes.
pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<(), ExecError>;
}

// ============================================================================
// System Runner
// ============================================================================

/// Runs commands as child processes sharing our stdout/stderr.
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<(), ExecError> {
        let name = invocation.name().to_owned();
        let mut command = prepare(invocation)?;
        command
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        log!("exec"; "{invocation}");

        let mut child = command.spawn().map_err(|source| ExecError::Spawn {
            name: name.clone(),
            source,
        })?;

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    // Kill may race with a natural exit; either way the child is gone.
                    child.kill().ok();
                    child.wait().ok();
                    return Err(ExecError::Timeout {
                        name,
                        timeout: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => return Err(ExecError::Wait { name, source }),
            }
        };

        check_status(&name, status)
    }
}

/// Build a `Command` from an invocation.
fn prepare(invocation: &Invocation) -> Result<Command, ExecError> {
    let (program, leading) = invocation.command.split_first().ok_or(ExecError::Empty)?;
    if program.is_empty() {
        return Err(ExecError::Empty);
    }

    let mut command = Command::new(program);
    command
        .args(leading.iter().map(OsString::from))
        .args(invocation.args.iter().map(OsString::from))
        .current_dir(&invocation.cwd);
    Ok(command)
}

fn check_status(name: &str, status: ExitStatus) -> Result<(), ExecError> {
    if status.success() {
        Ok(())
    } else {
        Err(ExecError::Exit {
            name: name.to_owned(),
            status: status.to_string(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_invocation_filters_empty_args() {
        let inv = Invocation::new(
            &strings(&["firebase"]),
            &strings(&["use", "", "blog"]),
            Path::new("."),
        );
        assert_eq!(inv.args, strings(&["use", "blog"]));
        assert_eq!(inv.to_string(), "firebase use blog");
        assert_eq!(inv.name(), "firebase");
    }

    #[test]
    fn test_prepare_empty() {
        let inv = Invocation::new(&[], &[], Path::new("."));
        assert!(matches!(prepare(&inv), Err(ExecError::Empty)));
        assert_eq!(inv.name(), "<empty>");
    }

    #[test]
    fn test_prepare_valid() {
        let inv = Invocation::new(&strings(&["echo", "-n"]), &strings(&["hi"]), Path::new("."));
        let command = prepare(&inv).unwrap();
        assert_eq!(command.get_program(), "echo");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, ["-n", "hi"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_success_and_failure() {
        let mut runner = SystemRunner::new(Duration::from_secs(10));
        let ok = Invocation::new(&strings(&["true"]), &[], Path::new("."));
        assert!(runner.run(&ok).is_ok());

        let fail = Invocation::new(&strings(&["false"]), &[], Path::new("."));
        assert!(matches!(runner.run(&fail), Err(ExecError::Exit { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_timeout_kills_child() {
        let mut runner = SystemRunner::new(Duration::from_millis(100));
        let slow = Invocation::new(&strings(&["sleep"]), &strings(&["5"]), Path::new("."));
        let started = Instant::now();
        let err = runner.run(&slow).unwrap_err();

        assert!(matches!(err, ExecError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_system_runner_missing_program() {
        let mut runner = SystemRunner::new(Duration::from_secs(1));
        let inv = Invocation::new(
            &strings(&["folio-definitely-not-installed"]),
            &[],
            Path::new("."),
        );
        assert!(matches!(runner.run(&inv), Err(ExecError::Spawn { .. })));
    }
}
