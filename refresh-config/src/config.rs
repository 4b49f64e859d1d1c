use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use refresh_core::error::{BenchError, Result};

/// Provider declaration written into the workspace after `init`.
pub const DEFAULT_PROVIDER_CONFIG: &str = r#"
provider "aviatrix" {
  skip_version_validation = true
}
terraform {
  required_providers {
    aviatrix = {
      source = "aviatrixsystems/aviatrix"
    }
  }
}
"#;

/// Settings for a refresh measurement.
///
/// Every field has a default, so an empty YAML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Conventional name of the state file, in both the project and the workspace.
    pub state_file: String,

    /// Extension of configuration files, without the leading dot.
    pub config_extension: String,

    /// External query processor used to filter the state.
    pub query_tool: String,

    /// External provisioning tool exposing `init` and `refresh`.
    pub provision_tool: String,

    /// File the provider declaration is written to inside the workspace.
    pub provider_config_file: String,

    pub provider_config: String,

    pub workspace_prefix: String,

    /// Parent of the workspace; the system temp dir when unset.
    pub workspace_root: Option<PathBuf>,

    /// Default number of timed refresh runs.
    pub runs: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            state_file: "terraform.tfstate".to_string(),
            config_extension: "tf".to_string(),
            query_tool: "jq".to_string(),
            provision_tool: "terraform".to_string(),
            provider_config_file: "main.tf".to_string(),
            provider_config: DEFAULT_PROVIDER_CONFIG.to_string(),
            workspace_prefix: "measureRefresh".to_string(),
            workspace_root: None,
            runs: 1,
        }
    }
}

impl BenchConfig {
    /// Normalizes and checks the config.
    ///
    /// A leading dot on `config_extension` is stripped.
    pub fn validate(mut self) -> Result<Self> {
        self.config_extension = self.config_extension.trim_start_matches('.').to_string();

        let required = [
            ("state_file", &self.state_file),
            ("config_extension", &self.config_extension),
            ("query_tool", &self.query_tool),
            ("provision_tool", &self.provision_tool),
            ("provider_config_file", &self.provider_config_file),
            ("workspace_prefix", &self.workspace_prefix),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(BenchError::Config(format!("{} must not be empty", field)));
            }
        }

        if self.runs == 0 {
            return Err(BenchError::Config("runs must be at least 1".to_string()));
        }

        // The provisioning tool only reads files carrying the config extension.
        if !self
            .provider_config_file
            .ends_with(&format!(".{}", self.config_extension))
        {
            return Err(BenchError::Config(format!(
                "provider_config_file '{}' must end in .{}",
                self.provider_config_file, self.config_extension
            )));
        }

        Ok(self)
    }
}
