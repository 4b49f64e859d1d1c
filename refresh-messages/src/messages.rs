//! Central registry for all user-facing message templates.
//!
//! Naming Convention:
//! - `common_*` - Shared messages (errors, hints)
//! - `{stage}_*` - Pipeline stage messages (workspace, filter, assemble, refresh)
//!
//! Templates use `{variable}` syntax for runtime values, which are
//! substituted by the `MessageBuilder`.

pub struct Messages {
    // ============================================================================
    // Common Messages
    // ============================================================================
    pub common_error_generic: &'static str,
    pub common_hint_install_tool: &'static str,
    pub common_hint_project_dir: &'static str,
    pub common_interrupted: &'static str,

    // ============================================================================
    // Run Header
    // ============================================================================
    pub run_header: &'static str,
    pub run_config_loaded: &'static str,

    // ============================================================================
    // Workspace Messages
    // ============================================================================
    pub workspace_creating: &'static str,
    pub workspace_created: &'static str,
    pub workspace_removed: &'static str,

    // ============================================================================
    // State Filter Messages
    // ============================================================================
    pub filter_running: &'static str,
    pub filter_writing: &'static str,

    // ============================================================================
    // Workspace Assembly Messages
    // ============================================================================
    pub assemble_copying: &'static str,
    pub assemble_init: &'static str,
    pub assemble_removing: &'static str,
    pub assemble_provider_config: &'static str,

    // ============================================================================
    // Refresh Measurement Messages
    // ============================================================================
    pub refresh_header: &'static str,
    pub refresh_sample: &'static str,
    pub refresh_average: &'static str,
}

pub const MESSAGES: Messages = Messages {
    // ============================================================================
    // Common Messages
    // ============================================================================
    common_error_generic: "Error: {error}",
    common_hint_install_tool: "Install {tool} or set its path in measure-refresh.yaml",
    common_hint_project_dir: "Run from the project directory holding the state and configuration files, or pass --dir",
    common_interrupted: "=> Interrupted, cleaning up",

    // ============================================================================
    // Run Header
    // ============================================================================
    run_header: "=> Measuring Refresh Time for all {resource_type} resources",
    run_config_loaded: "=> Using configuration from {source}",

    // ============================================================================
    // Workspace Messages
    // ============================================================================
    workspace_creating: "=> Making Temp Dir",
    workspace_created: "=> Made Temp Dir: {path}",
    workspace_removed: "=> Removed Temp Dir: {path}",

    // ============================================================================
    // State Filter Messages
    // ============================================================================
    filter_running: "=> Using {tool} to get resources from {state_file}",
    filter_writing: "=> Writing new statefile to temp dir",

    // ============================================================================
    // Workspace Assembly Messages
    // ============================================================================
    assemble_copying: "=> Copying over {count} *.{extension} file(s) to temp dir",
    assemble_init: "=> Running {tool} init",
    assemble_removing: "=> Removing *.{extension} files",
    assemble_provider_config: "=> Writing temp config file {file}",

    // ============================================================================
    // Refresh Measurement Messages
    // ============================================================================
    refresh_header: "=> Running {tool} refresh {runs} time(s) and measuring average execution time",
    refresh_sample: "=> Run {run}/{runs} took {seconds}s",
    refresh_average: "=> Average time to refresh {resource_type}: {seconds}s over {runs} run(s)",
};
