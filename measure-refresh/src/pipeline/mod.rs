//! The isolation-and-measurement pipeline.
//!
//! Stages run strictly in sequence and each depends on the previous one:
//! preconditions, workspace, state filter, assembly, timed refresh runs.
//! The workspace is owned by [`RefreshBenchmark::run`] and released on every
//! exit path.

pub mod assembler;
pub mod preconditions;
pub mod state_filter;
pub mod timed_runner;
pub mod workspace;

#[cfg(test)]
pub(crate) mod test_support;

use std::num::NonZeroU32;
use std::path::PathBuf;

use refresh_config::BenchConfig;
use refresh_core::bench_progress;
use refresh_core::error::{BenchError, Result};
use refresh_core::signals::{check_interrupted, interrupted};
use refresh_core::ProcessRunner;
use refresh_messages::{msg, MESSAGES};
use tracing::debug;

use crate::report::TimingReport;
use workspace::Workspace;

pub struct RefreshBenchmark<'a> {
    config: &'a BenchConfig,
    runner: &'a dyn ProcessRunner,
    project_dir: PathBuf,
}

impl<'a> RefreshBenchmark<'a> {
    pub fn new(
        config: &'a BenchConfig,
        runner: &'a dyn ProcessRunner,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            runner,
            project_dir: project_dir.into(),
        }
    }

    /// Measures `runs` refreshes of `resource_type` in a fresh workspace.
    pub fn run(&self, resource_type: &str, runs: NonZeroU32) -> Result<TimingReport> {
        bench_progress!(
            "{}",
            msg!(MESSAGES.run_header, resource_type = resource_type)
        );

        let config_files = preconditions::check(self.config, self.runner, &self.project_dir)?;

        bench_progress!("{}", MESSAGES.workspace_creating);
        let workspace =
            Workspace::create(&self.config.workspace_prefix, self.config.workspace_root.as_deref())?;
        bench_progress!(
            "{}",
            msg!(
                MESSAGES.workspace_created,
                path = workspace.path().display().to_string()
            )
        );

        let outcome = self.run_in(&workspace, &config_files, resource_type, runs);

        // A child stopped by the same signal, or one that still exited 0,
        // must not turn an interrupted run into a result
        if interrupted() {
            if let Err(e) = &outcome {
                debug!(error = %e, "stage ended after interrupt");
            }
            bench_progress!("{}", MESSAGES.common_interrupted);
            return Err(BenchError::Interrupted);
        }

        let report = outcome?;
        let path = workspace.path().display().to_string();
        workspace.close()?;
        bench_progress!("{}", msg!(MESSAGES.workspace_removed, path = path));
        Ok(report)
    }

    fn run_in(
        &self,
        workspace: &Workspace,
        config_files: &[PathBuf],
        resource_type: &str,
        runs: NonZeroU32,
    ) -> Result<TimingReport> {
        check_interrupted()?;
        bench_progress!(
            "{}",
            msg!(
                MESSAGES.filter_running,
                tool = self.config.query_tool.as_str(),
                state_file = self.config.state_file.as_str()
            )
        );
        let filtered =
            state_filter::filter_state(self.runner, self.config, &self.project_dir, resource_type)?;

        bench_progress!("{}", MESSAGES.filter_writing);
        state_filter::write_filtered_state(workspace, self.config, &filtered)?;

        check_interrupted()?;
        assembler::assemble(self.runner, self.config, workspace, config_files)?;

        timed_runner::measure(
            self.runner,
            &self.config.provision_tool,
            workspace.path(),
            resource_type,
            runs,
        )
    }
}
