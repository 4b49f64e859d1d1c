// Standard library
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::thread;
use std::time::Duration;

// External crates
use duct::cmd;
use tracing::{debug, warn};
use which::which;

use crate::error::{BenchError, Result};
use crate::signals::interrupted;

/// A single external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// First argument, which is the subcommand for tools like `terraform`.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    fn expression(&self) -> duct::Expression {
        let args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        let expression = cmd(self.program.as_str(), args);
        match &self.current_dir {
            Some(dir) => expression.dir(dir.clone()),
            None => expression,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Output of a command whose streams were captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    pub fn from_stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }
}

/// Blocking execution of external tools.
///
/// Every pipeline stage talks to the outside world through this trait so the
/// stages can be exercised against scripted results instead of real binaries.
pub trait ProcessRunner {
    /// Runs the command with stdout and stderr captured.
    ///
    /// A non-zero exit is returned as [`BenchError::CommandFailed`] carrying the
    /// captured stderr.
    fn capture(&self, spec: &CommandSpec) -> Result<CapturedOutput>;

    /// Runs the command with stdout and stderr inherited from this process.
    ///
    /// Both modes stop the child and return [`BenchError::Interrupted`] once
    /// SIGINT or SIGTERM has been recorded.
    fn stream(&self, spec: &CommandSpec) -> Result<()>;

    /// Checks if a command-line tool is available in the system's PATH.
    fn is_available(&self, program: &str) -> bool;
}

/// [`ProcessRunner`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

/// How often a running child is polled for exit or a pending interrupt.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn check_status(spec: &CommandSpec, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    Err(BenchError::CommandFailed {
        command: spec.to_string(),
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Starts `expression` and waits for it, killing the child once an
/// interrupt has been recorded.
fn wait_interruptible(spec: &CommandSpec, expression: duct::Expression) -> Result<Output> {
    let spawn_error = |source: std::io::Error| BenchError::Spawn {
        command: spec.to_string(),
        source,
    };
    let handle = expression.unchecked().start().map_err(spawn_error)?;

    loop {
        if let Some(output) = handle.try_wait().map_err(spawn_error)? {
            return Ok(output.clone());
        }
        if interrupted() {
            warn!(command = %spec, "interrupt received, stopping child process");
            if let Err(e) = handle.kill() {
                debug!(command = %spec, error = %e, "child already gone");
            }
            // Reap the killed child; its exit status is irrelevant
            let _ = handle.wait();
            return Err(BenchError::Interrupted);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

impl ProcessRunner for SystemRunner {
    fn capture(&self, spec: &CommandSpec) -> Result<CapturedOutput> {
        debug!(command = %spec, dir = ?spec.current_dir, "capturing command output");
        let output = wait_interruptible(
            spec,
            spec.expression().stdout_capture().stderr_capture(),
        )?;

        check_status(spec, &output)?;
        Ok(CapturedOutput {
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn stream(&self, spec: &CommandSpec) -> Result<()> {
        debug!(command = %spec, dir = ?spec.current_dir, "streaming command output");
        let output = wait_interruptible(spec, spec.expression())?;
        check_status(spec, &output)
    }

    fn is_available(&self, program: &str) -> bool {
        which(program).is_ok()
    }
}
