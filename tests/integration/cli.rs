//! Tests for the `pipegen` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// A settings file that keeps the run independent of the machine's docker login
/// and kubeconfig.
fn write_isolated_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("pipegen.toml");
    let content = format!(
        "kube_config = \"{}\"\ndocker_command = \"pipegen-no-such-docker\"\n",
        dir.join("no-kubeconfig").display()
    );
    std::fs::write(&path, content).unwrap();
    path
}

fn write_templates(dir: &Path) {
    std::fs::create_dir_all(dir.join("ci/tasks")).unwrap();
    std::fs::write(dir.join("ci/_pipeline.yml"), "app: ${custom}\nregion: ${region}\n").unwrap();
    std::fs::write(dir.join("ci/tasks/deploy.sh"), "#!/bin/sh\necho $${region} ${HOME}\n").unwrap();
}

fn pipegen(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pipegen").unwrap();
    cmd.current_dir(cwd).env_remove("PIPEGEN_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_vars_lists_each_template() {
    let temp = TempDir::new().unwrap();
    write_templates(&temp.path().join("templates"));

    pipegen(temp.path())
        .arg("vars")
        .assert()
        .success()
        .stdout(predicate::str::contains("_pipeline.yml"))
        .stdout(predicate::str::contains("custom"))
        .stdout(predicate::str::contains("deploy.sh"))
        .stdout(predicate::str::contains("HOME").not());
}

#[test]
fn test_generate_with_defaults_prints_summary() {
    let temp = TempDir::new().unwrap();
    write_templates(&temp.path().join("templates"));
    let config = write_isolated_config(temp.path());
    std::fs::create_dir_all(temp.path().join("ci")).unwrap();
    std::fs::write(temp.path().join("ci/secrets.yml"), "custom: pinned\n").unwrap();

    pipegen(temp.path())
        .args(["--config", &config.display().to_string(), "generate", "--defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("========================="))
        .stdout(predicate::str::contains("custom = 'pinned'"))
        .stdout(predicate::str::contains("region = 'CHANGEME_region'"));

    assert_eq!(
        std::fs::read_to_string(temp.path().join("ci/pipeline.yml")).unwrap(),
        "app: pinned\nregion: CHANGEME_region\n"
    );
    assert_eq!(
        std::fs::read_to_string(temp.path().join("ci/tasks/deploy.sh")).unwrap(),
        "#!/bin/sh\necho CHANGEME_region ${HOME}\n"
    );
}

#[test]
fn test_generate_reads_answers_from_stdin() {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("tpl");
    std::fs::create_dir_all(&templates).unwrap();
    std::fs::write(templates.join("a.yml"), "region: ${region}\n").unwrap();
    let config = write_isolated_config(temp.path());

    pipegen(temp.path())
        .args(["--config", &config.display().to_string(), "generate", "--templates", "tpl"])
        .args(["--output", "out"])
        .write_stdin("eu-west-1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter 'region' default is [CHANGEME_region] : "));

    assert_eq!(
        std::fs::read_to_string(temp.path().join("out/a.yml")).unwrap(),
        "region: eu-west-1\n"
    );
}

#[test]
fn test_generate_save_writes_values_file() {
    let temp = TempDir::new().unwrap();
    write_templates(&temp.path().join("templates"));
    let config = write_isolated_config(temp.path());

    pipegen(temp.path())
        .args(["--config", &config.display().to_string(), "generate", "--defaults", "--save"])
        .args(["--values", "ci/values.yml"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(temp.path().join("ci/values.yml")).unwrap();
    assert!(saved.contains("region: CHANGEME_region"));
    assert!(saved.contains("custom: CHANGEME_custom"));
}

#[test]
fn test_missing_template_root_is_reported() {
    let temp = TempDir::new().unwrap();

    pipegen(temp.path())
        .args(["generate", "--defaults", "--templates", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template directory not found"))
        .stderr(predicate::str::contains("--templates"));
}

#[test]
fn test_missing_config_file_is_reported() {
    let temp = TempDir::new().unwrap();

    pipegen(temp.path())
        .args(["--config", "missing.toml", "vars"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_stdin_closed_fails_prompt() {
    let temp = TempDir::new().unwrap();
    write_templates(&temp.path().join("templates"));
    let config = write_isolated_config(temp.path());

    pipegen(temp.path())
        .args(["--config", &config.display().to_string(), "generate"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read a value for 'custom'"));
}
