//! Scripted [`ProcessRunner`] for exercising pipeline stages without real tools.

use std::cell::RefCell;
use std::collections::HashSet;

use crate::command_stream::{CapturedOutput, CommandSpec, ProcessRunner};
use crate::error::{BenchError, Result};

/// How a recorded call was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    Capture,
    Stream,
}

/// A call observed by [`ScriptedRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub spec: CommandSpec,
    pub mode: CallMode,
}

type Handler<'a> = Box<dyn Fn(&CommandSpec) -> Result<CapturedOutput> + 'a>;

/// Runner whose outcomes are decided by a closure.
///
/// Every call is recorded before the closure runs, so a failing call still
/// shows up in [`ScriptedRunner::calls`].
pub struct ScriptedRunner<'a> {
    handler: Handler<'a>,
    missing: HashSet<String>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl<'a> ScriptedRunner<'a> {
    pub fn new(handler: impl Fn(&CommandSpec) -> Result<CapturedOutput> + 'a) -> Self {
        Self {
            handler: Box::new(handler),
            missing: HashSet::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Runner where every command succeeds with empty output.
    pub fn succeeding() -> Self {
        Self::new(|_| Ok(CapturedOutput::default()))
    }

    /// Marks `program` as absent from PATH.
    pub fn without_tool(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls whose first argument is `subcommand`.
    pub fn count_subcommand(&self, subcommand: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.spec.subcommand() == Some(subcommand))
            .count()
    }

    fn record(&self, spec: &CommandSpec, mode: CallMode) {
        self.calls.borrow_mut().push(RecordedCall {
            spec: spec.clone(),
            mode,
        });
    }
}

impl ProcessRunner for ScriptedRunner<'_> {
    fn capture(&self, spec: &CommandSpec) -> Result<CapturedOutput> {
        self.record(spec, CallMode::Capture);
        (self.handler)(spec)
    }

    fn stream(&self, spec: &CommandSpec) -> Result<()> {
        self.record(spec, CallMode::Stream);
        (self.handler)(spec).map(|_| ())
    }

    fn is_available(&self, program: &str) -> bool {
        !self.missing.contains(program)
    }
}

/// The error a tool exiting with `code` and printing `stderr` would produce.
pub fn exit_failure(spec: &CommandSpec, code: i32, stderr: &str) -> BenchError {
    BenchError::CommandFailed {
        command: spec.to_string(),
        status: format!("exit status: {}", code),
        stderr: stderr.to_string(),
    }
}
