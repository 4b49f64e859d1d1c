//! Turns the workspace into a minimal, initialized project.
//!
//! The original configuration is only present while `init` runs, so the
//! provider plugins it needs get installed. The measured refresh then sees
//! nothing but the provider declaration and the filtered state.

use std::path::PathBuf;

use refresh_config::BenchConfig;
use refresh_core::bench_progress;
use refresh_core::error::{BenchError, Result};
use refresh_core::file_system::remove_files;
use refresh_core::{CommandSpec, ProcessRunner};
use refresh_messages::{msg, MESSAGES};
use tracing::debug;

use super::workspace::Workspace;

pub fn init_command(config: &BenchConfig, workspace: &Workspace) -> CommandSpec {
    CommandSpec::new(&config.provision_tool)
        .arg("init")
        .current_dir(workspace.path())
}

/// Copies the config files in, runs `init`, removes the copies and writes
/// the provider declaration. Stops at the first failing step.
pub fn assemble(
    runner: &dyn ProcessRunner,
    config: &BenchConfig,
    workspace: &Workspace,
    config_files: &[PathBuf],
) -> Result<()> {
    bench_progress!(
        "{}",
        msg!(
            MESSAGES.assemble_copying,
            count = config_files.len().to_string(),
            extension = config.config_extension.as_str()
        )
    );
    let copied = config_files
        .iter()
        .map(|file| workspace.copy_in(file))
        .collect::<Result<Vec<_>>>()?;

    bench_progress!(
        "{}",
        msg!(MESSAGES.assemble_init, tool = config.provision_tool.as_str())
    );
    let output = runner.capture(&init_command(config, workspace))?;
    debug!(
        stdout = %String::from_utf8_lossy(&output.stdout),
        "init finished"
    );

    bench_progress!(
        "{}",
        msg!(
            MESSAGES.assemble_removing,
            extension = config.config_extension.as_str()
        )
    );
    remove_files(&copied).map_err(|e| BenchError::workspace("removing copied config files", e))?;

    bench_progress!(
        "{}",
        msg!(
            MESSAGES.assemble_provider_config,
            file = config.provider_config_file.as_str()
        )
    );
    workspace.write_file(&config.provider_config_file, config.provider_config.as_bytes())?;

    Ok(())
}
