//! CLI integration tests for phony
//!
//! These tests run the `phony` binary against scratch projects and observe
//! which commands ran through the files they leave behind.

use std::fs;
use std::path::Path;

use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the phony binary
fn phony_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("phony").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a temporary project with the given phony.yml
fn setup_project(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("phony.yml"), config).unwrap();
    dir
}

fn ran(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("ran.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

const API_DOCS_PROJECT: &str = r#"
name: demo
default: test
targets:
  - name: test
    description: Run the test suite
    command: "echo test >> ran.log"
  - name: gen-api-docs
    description: Regenerate the API reference
    command: "echo gen-api-docs >> ran.log"
  - name: docs
    description: Build the documentation
    command: "echo docs >> ran.log"
  - name: api-docs
    dependencies: [gen-api-docs, docs]
"#;

// =============================================================================
// Running targets
// =============================================================================

#[cfg(unix)]
#[test]
fn test_run_target_with_prerequisites() {
    let dir = setup_project(API_DOCS_PROJECT);

    phony_cmd()
        .current_dir(dir.path())
        .arg("api-docs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished"));

    assert_eq!(ran(dir.path()), vec!["gen-api-docs", "docs"]);
}

#[cfg(unix)]
#[test]
fn test_default_target_runs_when_none_given() {
    let dir = setup_project(API_DOCS_PROJECT);

    phony_cmd().current_dir(dir.path()).assert().success();

    assert_eq!(ran(dir.path()), vec!["test"]);
}

#[cfg(unix)]
#[test]
fn test_failing_command_exit_code_is_propagated() {
    let dir = setup_project(
        r#"
targets:
  - name: gen-api-docs
    command:
      - "echo gen-api-docs >> ran.log; exit 2"
      - "echo after >> ran.log"
  - name: docs
    command: "echo docs >> ran.log"
  - name: api-docs
    dependencies: [gen-api-docs, docs]
    command: "echo api-docs >> ran.log"
"#,
    );

    phony_cmd()
        .current_dir(dir.path())
        .arg("api-docs")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("in target 'gen-api-docs' failed with exit code 2"));

    assert_eq!(ran(dir.path()), vec!["gen-api-docs"]);
}

#[cfg(unix)]
#[test]
fn test_quiet_keeps_command_output() {
    let dir = setup_project(
        r#"
targets:
  - name: greet
    description: Say hello
    command: "echo hello from greet"
"#,
    );

    phony_cmd()
        .current_dir(dir.path())
        .args(["--quiet", "greet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello from greet"))
        .stdout(predicate::str::contains("Running target").not())
        .stdout(predicate::str::contains("Finished").not());
}

#[cfg(unix)]
#[test]
fn test_directory_and_file_options() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("ci")).unwrap();
    fs::write(
        dir.path().join("ci/targets.yml"),
        "targets:\n  - name: lint\n    command: \"echo lint >> ran.log\"\n",
    )
    .unwrap();

    phony_cmd()
        .arg("-C")
        .arg(dir.path())
        .args(["-f", "ci/targets.yml", "lint"])
        .assert()
        .success();

    assert_eq!(ran(dir.path()), vec!["lint"]);
}

// =============================================================================
// Resolution errors
// =============================================================================

#[test]
fn test_unknown_target_fails_before_running_anything() {
    let dir = setup_project(API_DOCS_PROJECT);

    phony_cmd()
        .current_dir(dir.path())
        .arg("publish")
        .assert()
        .code(125)
        .stderr(predicate::str::contains("Target 'publish' not found"));

    assert!(ran(dir.path()).is_empty());
}

#[test]
fn test_cycle_is_reported() {
    let dir = setup_project(
        r#"
targets:
  - name: a
    dependencies: [b]
    command: "echo a >> ran.log"
  - name: b
    dependencies: [a]
    command: "echo b >> ran.log"
"#,
    );

    phony_cmd()
        .current_dir(dir.path())
        .arg("a")
        .assert()
        .code(125)
        .stderr(predicate::str::contains("a -> b -> a"));

    assert!(ran(dir.path()).is_empty());
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();

    phony_cmd()
        .current_dir(dir.path())
        .arg("test")
        .assert()
        .code(125)
        .stderr(predicate::str::contains("No phony.yml or phony.yaml found"));
}

#[test]
fn test_duplicate_target_is_rejected() {
    let dir = setup_project(
        r#"
targets:
  - name: docs
    command: "true"
  - name: docs
    command: "true"
"#,
    );

    phony_cmd()
        .current_dir(dir.path())
        .arg("docs")
        .assert()
        .code(125)
        .stderr(predicate::str::contains("Target 'docs' is defined more than once"));
}

// =============================================================================
// Inspection modes
// =============================================================================

#[test]
fn test_dry_run_spawns_nothing() {
    let dir = setup_project(API_DOCS_PROJECT);

    phony_cmd()
        .current_dir(dir.path())
        .args(["--dry-run", "api-docs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. gen-api-docs"))
        .stdout(predicate::str::contains("2. docs"))
        .stdout(predicate::str::contains("3. api-docs"))
        .stdout(predicate::str::contains("echo gen-api-docs >> ran.log"));

    assert!(ran(dir.path()).is_empty());
}

#[test]
fn test_list_shows_descriptions_and_default() {
    let dir = setup_project(API_DOCS_PROJECT);

    phony_cmd()
        .current_dir(dir.path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Targets of demo"))
        .stdout(predicate::str::contains("Regenerate the API reference"))
        .stdout(predicate::str::contains("[default]"));
}

#[test]
fn test_check_and_graph() {
    let dir = setup_project(API_DOCS_PROJECT);

    phony_cmd()
        .current_dir(dir.path())
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 target(s) resolve"));

    phony_cmd()
        .current_dir(dir.path())
        .arg("--graph")
        .assert()
        .success()
        .stdout(predicate::str::contains("← gen-api-docs, docs\n"));
}

#[test]
fn test_schema_needs_no_project() {
    let dir = TempDir::new().unwrap();

    phony_cmd()
        .current_dir(dir.path())
        .arg("--schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"workingDirectory\""));
}

#[test]
fn test_modes_are_exclusive() {
    let dir = setup_project(API_DOCS_PROJECT);

    phony_cmd()
        .current_dir(dir.path())
        .args(["--list", "--dry-run"])
        .assert()
        .failure();
}

#[test]
fn test_demo_project_plan() {
    let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/matchpy");

    phony_cmd()
        .arg("-C")
        .arg(&demo)
        .args(["--dry-run", "api-docs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sphinx-apidoc"));
}
