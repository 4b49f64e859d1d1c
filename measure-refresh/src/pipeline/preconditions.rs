//! Checks run before anything is created on disk.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use refresh_config::BenchConfig;
use refresh_core::error::{BenchError, Result};
use refresh_core::file_system::files_with_extension;
use refresh_core::ProcessRunner;
use tracing::debug;

/// Verifies the project directory and tool availability.
///
/// Returns the configuration files to copy into the workspace. Has no side
/// effects; the first unmet precondition is returned.
pub fn check(
    config: &BenchConfig,
    runner: &dyn ProcessRunner,
    project_dir: &Path,
) -> Result<Vec<PathBuf>> {
    check_state_file(config, project_dir)?;

    let config_files = files_with_extension(project_dir, &config.config_extension);
    if config_files.is_empty() {
        return Err(BenchError::MissingConfigFiles {
            extension: config.config_extension.clone(),
            dir: project_dir.to_path_buf(),
        });
    }
    debug!(count = config_files.len(), "found configuration files");

    for tool in [&config.query_tool, &config.provision_tool] {
        if !runner.is_available(tool) {
            return Err(BenchError::ToolNotFound { tool: tool.clone() });
        }
    }

    Ok(config_files)
}

fn check_state_file(config: &BenchConfig, project_dir: &Path) -> Result<()> {
    let missing = |source: io::Error| BenchError::MissingStateFile {
        file: config.state_file.clone(),
        dir: project_dir.to_path_buf(),
        source,
    };

    let state_path = project_dir.join(&config.state_file);
    let file = File::open(&state_path).map_err(missing)?;
    // Opening a directory succeeds on unix
    if !file.metadata().map_err(missing)?.is_file() {
        return Err(missing(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    Ok(())
}
