//! Values file persistence across runs.

use pipegen_cli::config::GeneratorConfig;
use pipegen_cli::pipeline::generate_pipeline;
use pipegen_cli::resolver::AcceptDefaults;
use pipegen_cli::test_utils::{ScriptedPrompter, StaticHost, TemplateTree};
use pipegen_cli::values;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_saved_answers_seed_the_next_run() {
    let templates = TemplateTree::new().file("p.yml", "app: ${app_name}\nregion: ${region}\n").build();
    let workspace = TempDir::new().unwrap();
    let config = GeneratorConfig {
        templates: Some(templates.path().to_path_buf()),
        output: Some(workspace.path().to_path_buf()),
        values_file: Some(workspace.path().join("ci/secrets.yml")),
        ..Default::default()
    };
    let host = Arc::new(StaticHost::new().with_remote("git@github.com:acme/hello-app.git"));

    let summary =
        generate_pipeline(&config, host.clone(), ScriptedPrompter::new(["", "eu-west-1"])).unwrap();
    values::save(&config.values_path(), &summary.merged_values()).unwrap();

    // Second run: both values come from the file and are offered as defaults.
    let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
    let summary = generate_pipeline(&config, host, &mut prompter).unwrap();

    assert_eq!(
        summary.resolved,
        vec![
            ("app_name".to_string(), "hello-app".to_string()),
            ("region".to_string(), "eu-west-1".to_string()),
        ]
    );
    assert_eq!(
        prompter.asked(),
        &[
            ("app_name".to_string(), Some("hello-app".to_string())),
            ("region".to_string(), Some("eu-west-1".to_string())),
        ]
    );
}

#[test]
fn test_multiline_value_survives_save_and_reload() {
    let workspace = TempDir::new().unwrap();
    let path = workspace.path().join("ci/secrets.yml");
    let kube = "apiVersion: v1\nclusters:\n- cluster:\n    server: https://10.0.0.1\n  name: dev\n";

    let mut stored = values::Values::new();
    stored.insert("kube_config".to_string(), kube.to_string());
    values::save(&path, &stored).unwrap();

    let templates = TemplateTree::new().file("k.yml", "kube: ${kube_config}\n").build();
    let config = GeneratorConfig {
        templates: Some(templates.path().to_path_buf()),
        output: Some(workspace.path().join("out")),
        values_file: Some(path),
        ..Default::default()
    };

    let summary = generate_pipeline(&config, Arc::new(StaticHost::new()), AcceptDefaults).unwrap();
    assert_eq!(summary.resolved, vec![("kube_config".to_string(), kube.to_string())]);

    let rendered = std::fs::read_to_string(workspace.path().join("out/k.yml")).unwrap();
    assert_eq!(
        rendered,
        "kube: |\n  apiVersion: v1\n  clusters:\n  - cluster:\n      server: https://10.0.0.1\n    name: dev\n"
    );
}

#[test]
fn test_malformed_values_file_aborts_before_rendering() {
    let workspace = TempDir::new().unwrap();
    let path = workspace.path().join("secrets.yml");
    std::fs::write(&path, "just a string\n").unwrap();
    let templates = TemplateTree::new().file("a.yml", "${x}").build();
    let config = GeneratorConfig {
        templates: Some(templates.path().to_path_buf()),
        output: Some(workspace.path().join("out")),
        values_file: Some(path),
        ..Default::default()
    };

    let err = generate_pipeline(&config, Arc::new(StaticHost::new()), AcceptDefaults).unwrap_err();
    assert!(err.to_string().contains("Invalid values file"));
    assert!(!workspace.path().join("out").exists());
}
