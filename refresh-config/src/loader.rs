// Standard library imports
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// External crate imports
use anyhow::{Context, Result};
use tracing::debug;

// Internal imports
use crate::config::BenchConfig;
use refresh_core::error::BenchError;

/// File name looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = "measure-refresh.yaml";

pub const ENV_QUERY_TOOL: &str = "MEASURE_REFRESH_QUERY_TOOL";
pub const ENV_PROVISION_TOOL: &str = "MEASURE_REFRESH_PROVISION_TOOL";
pub const ENV_WORKSPACE_ROOT: &str = "MEASURE_REFRESH_WORKSPACE_ROOT";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Project(PathBuf),
    User(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(path)
            | ConfigSource::Project(path)
            | ConfigSource::User(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: BenchConfig,
    pub source: ConfigSource,
}

/// Finds and loads the [`BenchConfig`].
///
/// Priority chain, first hit wins:
/// 1. **Explicit path:** `--config <path>`, which must exist.
/// 2. **Project directory:** `measure-refresh.yaml` next to the state file.
/// 3. **User configuration:** `<config dir>/measure-refresh/config.yaml`.
/// 4. **Built-in defaults.**
///
/// Environment overrides are applied on top of whichever source won.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    explicit: Option<PathBuf>,
    user_config: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            user_config: dirs::config_dir()
                .map(|dir| dir.join("measure-refresh").join("config.yaml")),
        }
    }

    /// Replaces the user config location; `None` disables that lookup.
    pub fn with_user_config(mut self, path: Option<PathBuf>) -> Self {
        self.user_config = path;
        self
    }

    pub fn load(&self, project_dir: &Path) -> refresh_core::Result<LoadedConfig> {
        self.load_with_env(project_dir, |key| std::env::var(key).ok())
    }

    /// Like [`ConfigLoader::load`] with environment lookups routed through `env`.
    pub fn load_with_env(
        &self,
        project_dir: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> refresh_core::Result<LoadedConfig> {
        let (config, source) = self
            .discover(project_dir)
            .map_err(|e| BenchError::Config(format!("{:#}", e)))?;

        let config = apply_env_overrides(config, env).validate()?;
        debug!(source = %source, "configuration loaded");
        Ok(LoadedConfig { config, source })
    }

    fn discover(&self, project_dir: &Path) -> Result<(BenchConfig, ConfigSource)> {
        // Priority 1: explicit path
        if let Some(path) = &self.explicit {
            let config = load_file(path)?;
            return Ok((config, ConfigSource::Explicit(path.clone())));
        }

        // Priority 2: project directory
        let project_config = project_dir.join(PROJECT_CONFIG_FILE);
        if project_config.is_file() {
            debug!("Loading config from: {}", project_config.display());
            let config = load_file(&project_config)?;
            return Ok((config, ConfigSource::Project(project_config)));
        }

        // Priority 3: user configuration
        if let Some(user_config) = self.user_config.as_ref().filter(|p| p.is_file()) {
            debug!("Loading config from: {}", user_config.display());
            let config = load_file(user_config)?;
            return Ok((config, ConfigSource::User(user_config.clone())));
        }

        Ok((BenchConfig::default(), ConfigSource::Defaults))
    }
}

fn load_file(path: &Path) -> Result<BenchConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    // An empty file deserializes as YAML null rather than an empty mapping.
    if contents.trim().is_empty() {
        return Ok(BenchConfig::default());
    }

    serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn apply_env_overrides(mut config: BenchConfig, env: impl Fn(&str) -> Option<String>) -> BenchConfig {
    let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    if let Some(tool) = non_empty(ENV_QUERY_TOOL) {
        config.query_tool = tool;
    }
    if let Some(tool) = non_empty(ENV_PROVISION_TOOL) {
        config.provision_tool = tool;
    }
    if let Some(root) = non_empty(ENV_WORKSPACE_ROOT) {
        config.workspace_root = Some(PathBuf::from(root));
    }
    config
}
