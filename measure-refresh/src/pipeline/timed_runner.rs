use std::num::NonZeroU32;
use std::path::Path;
use std::time::Instant;

use refresh_core::bench_progress;
use refresh_core::error::Result;
use refresh_core::signals::check_interrupted;
use refresh_core::{CommandSpec, ProcessRunner};
use refresh_messages::{msg, MESSAGES};
use tracing::info;

use crate::report::{format_seconds, TimingReport};

pub fn refresh_command(tool: &str, workspace_dir: &Path) -> CommandSpec {
    CommandSpec::new(tool).arg("refresh").current_dir(workspace_dir)
}

/// Runs `refresh` `runs` times in sequence, timing each run.
///
/// Output is streamed to this process's stdout/stderr. The first failing run
/// aborts the measurement; no report is produced from partial samples.
pub fn measure(
    runner: &dyn ProcessRunner,
    tool: &str,
    workspace_dir: &Path,
    resource_type: &str,
    runs: NonZeroU32,
) -> Result<TimingReport> {
    bench_progress!(
        "{}",
        msg!(MESSAGES.refresh_header, tool = tool, runs = runs.to_string())
    );

    let spec = refresh_command(tool, workspace_dir);
    let mut samples = Vec::with_capacity(runs.get() as usize);
    for run in 1..=runs.get() {
        check_interrupted()?;

        let start = Instant::now();
        runner.stream(&spec)?;
        let elapsed = start.elapsed();

        info!(run, elapsed_ms = elapsed.as_millis() as u64, "refresh finished");
        bench_progress!(
            "{}",
            msg!(
                MESSAGES.refresh_sample,
                run = run.to_string(),
                runs = runs.to_string(),
                seconds = format_seconds(elapsed)
            )
        );
        samples.push(elapsed);
    }

    Ok(TimingReport::new(resource_type, samples))
}
