//! Fixtures shared by the pipeline tests.

use std::fs;
use std::path::{Path, PathBuf};

use refresh_config::BenchConfig;
use refresh_core::{CapturedOutput, CommandSpec, Result};
use serde_json::{json, Value};
use tempfile::TempDir;

/// A project directory plus a private workspace root.
pub struct ProjectFixture {
    project: TempDir,
    workspace_root: TempDir,
    pub config: BenchConfig,
}

impl ProjectFixture {
    pub fn new() -> Self {
        let project = TempDir::new().expect("project dir");
        let workspace_root = TempDir::new().expect("workspace root");
        let config = BenchConfig {
            workspace_root: Some(workspace_root.path().to_path_buf()),
            ..Default::default()
        };
        Self {
            project,
            workspace_root,
            config,
        }
    }

    /// Project with a `main.tf` and a state holding one `aviatrix_gateway`.
    pub fn with_files() -> Self {
        let fixture = Self::new();
        fixture.write("main.tf", "provider \"aviatrix\" {}\n");
        fixture.write_state(&[("aviatrix_gateway", "gw")]);
        fixture
    }

    pub fn path(&self) -> &Path {
        self.project.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.project.path().join(name);
        fs::write(&path, contents).expect("write project file");
        path
    }

    pub fn write_state(&self, resources: &[(&str, &str)]) -> PathBuf {
        let state = state_document(resources);
        self.write(&self.config.state_file, &state.to_string())
    }

    /// Entries currently present under the workspace root.
    pub fn workspace_entries(&self) -> Vec<PathBuf> {
        fs::read_dir(self.workspace_root.path())
            .expect("read workspace root")
            .map(|entry| entry.expect("dir entry").path())
            .collect()
    }
}

/// A state document in the provisioning tool's layout.
pub fn state_document(resources: &[(&str, &str)]) -> Value {
    let resources: Vec<Value> = resources
        .iter()
        .map(|(kind, name)| {
            json!({
                "mode": "managed",
                "type": kind,
                "name": name,
                "provider": "provider[\"registry.terraform.io/aviatrixsystems/aviatrix\"]",
                "instances": [{ "attributes": { "id": name } }]
            })
        })
        .collect();
    json!({
        "version": 4,
        "terraform_version": "1.5.7",
        "serial": 12,
        "lineage": "0e1f5b4c-8d3a-4d7e-9d43-6f0e2f6f4b1a",
        "outputs": {},
        "resources": resources
    })
}

/// Resource types listed in a state document, in order.
pub fn resource_types(state: &[u8]) -> Vec<String> {
    let state: Value = serde_json::from_slice(state).expect("state is JSON");
    state["resources"]
        .as_array()
        .expect("resources array")
        .iter()
        .map(|r| r["type"].as_str().expect("type").to_string())
        .collect()
}

/// Stand-in for the query processor: keeps resources of `resource_type`
/// from the state file named by the command's last argument.
pub fn fake_filter(spec: &CommandSpec, resource_type: &str) -> Result<CapturedOutput> {
    let state_name = spec.args.last().expect("state file argument");
    let dir = spec.current_dir.clone().unwrap_or_default();
    let raw = fs::read(dir.join(state_name))?;
    let mut state: Value = serde_json::from_slice(&raw).expect("state is JSON");
    if let Some(resources) = state["resources"].as_array_mut() {
        resources.retain(|r| r["type"] == resource_type);
    }
    Ok(CapturedOutput::from_stdout(state.to_string()))
}
