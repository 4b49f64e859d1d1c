use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// A project directory, a private workspace root and a private HOME so the
/// user's own configuration never leaks into a run.
struct Sandbox {
    home: TempDir,
    project: TempDir,
    workspace_root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: tempdir().unwrap(),
            project: tempdir().unwrap(),
            workspace_root: tempdir().unwrap(),
        }
    }

    fn with_project() -> Self {
        let sandbox = Self::new();
        fs::write(
            sandbox.project.path().join("main.tf"),
            "provider \"aviatrix\" {}\n",
        )
        .unwrap();
        let state = json!({
            "version": 4,
            "resources": [
                { "type": "aviatrix_gateway", "name": "a" },
                { "type": "aviatrix_vpc", "name": "b" },
                { "type": "aviatrix_gateway", "name": "c" },
                { "type": "aviatrix_vpc", "name": "d" },
                { "type": "aviatrix_gateway", "name": "e" }
            ]
        });
        fs::write(
            sandbox.project.path().join("terraform.tfstate"),
            state.to_string(),
        )
        .unwrap();
        sandbox
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("measure-refresh"));
        cmd.current_dir(self.project.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
            .env("MEASURE_REFRESH_WORKSPACE_ROOT", self.workspace_root.path())
            .env_remove("MEASURE_REFRESH_QUERY_TOOL")
            .env_remove("MEASURE_REFRESH_PROVISION_TOOL")
            .env_remove("RUST_LOG");
        cmd
    }

    fn workspace_entries(&self) -> Vec<PathBuf> {
        fs::read_dir(self.workspace_root.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }
}

#[test]
fn test_missing_resource_type_is_usage_error() {
    let sandbox = Sandbox::new();
    sandbox
        .command()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("RESOURCE_TYPE"));
}

#[test]
fn test_extra_positional_is_usage_error() {
    let sandbox = Sandbox::new();
    sandbox
        .command()
        .args(["aviatrix_gateway", "aviatrix_vpc"])
        .assert()
        .failure();
    assert!(sandbox.workspace_entries().is_empty());
}

#[test]
fn test_missing_state_file_fails_before_workspace() {
    let sandbox = Sandbox::new();
    sandbox
        .command()
        .arg("aviatrix_gateway")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("terraform.tfstate"));
    assert!(sandbox.workspace_entries().is_empty());
}

#[test]
fn test_missing_config_files_fails_before_workspace() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.project.path().join("terraform.tfstate"), "{}").unwrap();
    sandbox
        .command()
        .arg("aviatrix_gateway")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("*.tf"));
    assert!(sandbox.workspace_entries().is_empty());
}

#[test]
fn test_invalid_config_file_is_reported() {
    let sandbox = Sandbox::with_project();
    fs::write(
        sandbox.project.path().join("measure-refresh.yaml"),
        "runs: [not, a, number]\n",
    )
    .unwrap();
    sandbox
        .command()
        .arg("aviatrix_gateway")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("measure-refresh.yaml"));
    assert!(sandbox.workspace_entries().is_empty());
}

#[cfg(unix)]
mod with_stub_tools {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::time::{Duration, Instant};

    /// Installs executable shell scripts under `dir`.
    fn install(dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Refresh stub that snapshots the workspace it runs in.
    fn provision_stub(log: &Path, refresh_exit: i32) -> String {
        format!(
            r#"case "$1" in
  init) ls -A > "{log}/at-init.txt"; echo "Terraform has been successfully initialized!" ;;
  refresh) ls -A > "{log}/at-refresh.txt"; cp terraform.tfstate "{log}/state-at-refresh.json"; pwd > "{log}/workspace.txt"; exit {code} ;;
  *) exit 64 ;;
esac
"#,
            log = log.display(),
            code = refresh_exit
        )
    }

    fn stub_path(bin: &Path) -> String {
        format!("{}:/usr/bin:/bin", bin.display())
    }

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_full_run_reports_json_and_cleans_up() {
        let sandbox = Sandbox::with_project();
        let bin = tempdir().unwrap();
        let log = tempdir().unwrap();
        install(bin.path(), "jq", "cat \"$2\"\n");
        install(bin.path(), "terraform", &provision_stub(log.path(), 0));

        let output = sandbox
            .command()
            .env("PATH", stub_path(bin.path()))
            .args(["--runs", "2", "--json", "aviatrix_gateway"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let summary: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(summary["resource_type"], "aviatrix_gateway");
        assert_eq!(summary["runs"], 2);
        assert_eq!(summary["samples_ms"].as_array().unwrap().len(), 2);
        assert!(summary["mean_ms"].as_f64().unwrap() >= 0.0);

        assert_eq!(lines(&log.path().join("at-init.txt")), vec!["main.tf", "terraform.tfstate"]);
        assert_eq!(lines(&log.path().join("at-refresh.txt")), vec!["main.tf", "terraform.tfstate"]);

        let workspace = PathBuf::from(fs::read_to_string(log.path().join("workspace.txt")).unwrap().trim());
        assert!(workspace.to_string_lossy().contains("measureRefresh"));
        assert!(!workspace.exists());
        assert!(sandbox.workspace_entries().is_empty());
    }

    #[test]
    fn test_plain_report_line() {
        let sandbox = Sandbox::with_project();
        let bin = tempdir().unwrap();
        let log = tempdir().unwrap();
        install(bin.path(), "jq", "cat \"$2\"\n");
        install(bin.path(), "terraform", &provision_stub(log.path(), 0));

        sandbox
            .command()
            .env("PATH", stub_path(bin.path()))
            .arg("aviatrix_gateway")
            .assert()
            .success()
            .stdout(
                predicate::str::is_match(
                    r"^=> Average time to refresh aviatrix_gateway: \d+\.\d{3}s over 1 run\(s\)\n$",
                )
                .unwrap(),
            )
            .stderr(predicate::str::contains("=> Making Temp Dir"));
        assert!(sandbox.workspace_entries().is_empty());
    }

    #[test]
    fn test_refresh_failure_exits_non_zero_and_cleans_up() {
        let sandbox = Sandbox::with_project();
        let bin = tempdir().unwrap();
        let log = tempdir().unwrap();
        install(bin.path(), "jq", "cat \"$2\"\n");
        install(bin.path(), "terraform", &provision_stub(log.path(), 1));

        sandbox
            .command()
            .env("PATH", stub_path(bin.path()))
            .args(["-r", "3", "aviatrix_gateway"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("refresh"));
        assert!(sandbox.workspace_entries().is_empty());
    }

    #[test]
    fn test_filter_failure_exits_non_zero_and_cleans_up() {
        let sandbox = Sandbox::with_project();
        let bin = tempdir().unwrap();
        let log = tempdir().unwrap();
        install(bin.path(), "jq", "echo 'jq: error: cannot parse' >&2\nexit 2\n");
        install(bin.path(), "terraform", &provision_stub(log.path(), 0));

        sandbox
            .command()
            .env("PATH", stub_path(bin.path()))
            .arg("aviatrix_gateway")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("cannot parse"));
        assert!(!log.path().join("at-init.txt").exists());
        assert!(sandbox.workspace_entries().is_empty());
    }

    #[test]
    fn test_missing_query_tool_is_reported() {
        let sandbox = Sandbox::with_project();
        let bin = tempdir().unwrap();
        let log = tempdir().unwrap();
        install(bin.path(), "terraform", &provision_stub(log.path(), 0));

        sandbox
            .command()
            .env("PATH", bin.path())
            .env("MEASURE_REFRESH_QUERY_TOOL", "definitely-not-a-real-jq")
            .arg("aviatrix_gateway")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("definitely-not-a-real-jq"));
        assert!(sandbox.workspace_entries().is_empty());
    }

    /// Provisioning stub whose refresh sends SIGTERM to measure-refresh and
    /// then runs `after`.
    fn interrupting_stub(log: &Path, after: &str) -> String {
        format!(
            r#"case "$1" in
  init) exit 0 ;;
  refresh) echo run >> "{log}/refresh-calls.txt"; kill -TERM $PPID; {after} ;;
  *) exit 64 ;;
esac
"#,
            log = log.display(),
            after = after
        )
    }

    fn assert_interrupted(sandbox: &Sandbox, after: &str, runs: &str) -> TempDir {
        let bin = tempdir().unwrap();
        let log = tempdir().unwrap();
        install(bin.path(), "jq", "cat \"$2\"\n");
        install(bin.path(), "terraform", &interrupting_stub(log.path(), after));

        sandbox
            .command()
            .env("PATH", stub_path(bin.path()))
            .args(["--runs", runs, "aviatrix_gateway"])
            .timeout(Duration::from_secs(20))
            .assert()
            .code(130)
            .stdout(predicate::str::contains("Average").not())
            .stderr(predicate::str::contains("Interrupted"));
        assert!(sandbox.workspace_entries().is_empty());
        log
    }

    #[test]
    fn test_sigterm_during_last_refresh_that_still_succeeds() {
        let sandbox = Sandbox::with_project();
        let log = assert_interrupted(&sandbox, "exit 0", "1");
        assert_eq!(lines(&log.path().join("refresh-calls.txt")).len(), 1);
    }

    #[test]
    fn test_sigterm_followed_by_refresh_failure() {
        let sandbox = Sandbox::with_project();
        let log = assert_interrupted(&sandbox, "exit 1", "3");
        assert_eq!(lines(&log.path().join("refresh-calls.txt")).len(), 1);
    }

    #[test]
    fn test_sigterm_stops_a_hung_refresh() {
        let sandbox = Sandbox::with_project();
        let started = Instant::now();
        assert_interrupted(&sandbox, "exec sleep 30", "2");
        assert!(started.elapsed() < Duration::from_secs(15));
    }

    fn real_jq_available() -> bool {
        std::process::Command::new("jq")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_real_query_tool_keeps_only_requested_type() {
        if !real_jq_available() {
            eprintln!("jq not installed, skipping");
            return;
        }
        let sandbox = Sandbox::with_project();
        let bin = tempdir().unwrap();
        let log = tempdir().unwrap();
        install(bin.path(), "terraform", &provision_stub(log.path(), 0));
        let path = format!(
            "{}:{}",
            bin.path().display(),
            std::env::var("PATH").unwrap_or_default()
        );

        sandbox
            .command()
            .env("PATH", path)
            .arg("aviatrix_gateway")
            .assert()
            .success();

        let state: Value =
            serde_json::from_slice(&fs::read(log.path().join("state-at-refresh.json")).unwrap())
                .unwrap();
        let names: Vec<&str> = state["resources"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| {
                assert_eq!(r["type"], "aviatrix_gateway");
                r["name"].as_str().unwrap()
            })
            .collect();
        assert_eq!(names, vec!["a", "c", "e"]);
        assert_eq!(state["version"], 4);

        // Filtering an already filtered state changes nothing
        let again = std::process::Command::new("jq")
            .arg(r#"del(.resources[] | select(.type != "aviatrix_gateway"))"#)
            .arg("state-at-refresh.json")
            .current_dir(log.path())
            .output()
            .unwrap();
        assert!(again.status.success());
        let again: Value = serde_json::from_slice(&again.stdout).unwrap();
        assert_eq!(again, state);
    }
}
