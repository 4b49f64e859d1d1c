//! Reduces the project state to a single resource type via the query processor.

use std::path::Path;

use refresh_config::BenchConfig;
use refresh_core::error::Result;
use refresh_core::{CommandSpec, ProcessRunner};
use serde_json::Value;
use tracing::debug;

use super::workspace::Workspace;

/// Filter expression that deletes every resource whose type differs from
/// `resource_type`.
pub fn filter_expression(resource_type: &str) -> String {
    // A JSON string literal is also a valid query-language string literal.
    let literal = Value::from(resource_type).to_string();
    format!("del(.resources[] | select(.type != {}))", literal)
}

pub fn filter_command(config: &BenchConfig, project_dir: &Path, resource_type: &str) -> CommandSpec {
    CommandSpec::new(&config.query_tool)
        .arg(filter_expression(resource_type))
        .arg(&config.state_file)
        .current_dir(project_dir)
}

/// Runs the query processor and returns its stdout verbatim.
///
/// A non-zero exit surfaces as `CommandFailed` with the tool's stderr.
pub fn filter_state(
    runner: &dyn ProcessRunner,
    config: &BenchConfig,
    project_dir: &Path,
    resource_type: &str,
) -> Result<Vec<u8>> {
    let spec = filter_command(config, project_dir, resource_type);
    let output = runner.capture(&spec)?;
    debug!(bytes = output.stdout.len(), "filtered state produced");
    Ok(output.stdout)
}

/// Writes the filtered state under the conventional state file name.
pub fn write_filtered_state(
    workspace: &Workspace,
    config: &BenchConfig,
    filtered: &[u8],
) -> Result<()> {
    workspace.write_file(&config.state_file, filtered)?;
    Ok(())
}
