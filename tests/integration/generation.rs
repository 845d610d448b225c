//! Full generation runs over realistic template trees.

use pipegen_cli::config::GeneratorConfig;
use pipegen_cli::pipeline::generate_pipeline;
use pipegen_cli::resolver::AcceptDefaults;
use pipegen_cli::templating::ProcessReport;
use pipegen_cli::test_utils::{ScriptedPrompter, StaticHost, TemplateTree};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const PIPELINE: &str = "\
resources:
- name: source
  type: git
  source:
    uri: ${git_repo_uri}
    branch: ${git_branch}
- name: image
  type: docker-image
  source:
    repository: ${docker_repo}
    tag: ${docker_tag}
jobs:
- name: ${pipeline_name}
  plan:
  - put: image
    params:
      kubeconfig: ${kube_config}
";

const BUILD_SH: &str = "\
#!/bin/bash
set -e
echo \"Building ${BUILD_ID:-local}\"
docker build -t $${docker_image} .
";

fn templates() -> TempDir {
    TemplateTree::new()
        .file("ci/_pipeline.yml", PIPELINE)
        .file("ci/tasks/build.sh", BUILD_SH)
        .file("ci/tasks/build.yaml", "platform: linux\nrun:\n  path: ci/tasks/build.sh\n")
        .file("helm/Chart.tpl", "name: ${app_name}\n")
        .dir("ci/empty")
        .build()
}

fn host() -> Arc<StaticHost> {
    Arc::new(
        StaticHost::new()
            .with_remote("git@github.com:acme/hello-app.git")
            .with_branch("master")
            .with_docker_info(" Username: acme\n")
            .with_kube_config("apiVersion: v1\nclusters: []\n"),
    )
}

fn config(templates: &Path, workspace: &Path) -> GeneratorConfig {
    GeneratorConfig {
        templates: Some(templates.to_path_buf()),
        output: Some(workspace.to_path_buf()),
        values_file: Some(workspace.join("ci/secrets.yml")),
        ..Default::default()
    }
}

fn read(root: &Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn test_accepting_defaults_renders_whole_tree() {
    let templates = templates();
    let workspace = TempDir::new().unwrap();

    let summary =
        generate_pipeline(&config(templates.path(), workspace.path()), host(), AcceptDefaults)
            .unwrap();

    let pipeline = read(workspace.path(), "ci/pipeline.yml");
    assert!(pipeline.contains("uri: git@github.com:acme/hello-app.git\n"));
    assert!(pipeline.contains("branch: master\n"));
    assert!(pipeline.contains("repository: acme/hello-app\n"));
    assert!(pipeline.contains("tag: latest\n"));
    assert!(pipeline.contains("- name: hello-app-master\n"));
    assert!(pipeline.contains("kubeconfig: |\n  apiVersion: v1\n  clusters: []\n"));
    assert!(!workspace.path().join("ci/_pipeline.yml").exists());

    let script = read(workspace.path(), "ci/tasks/build.sh");
    assert!(script.contains("echo \"Building ${BUILD_ID:-local}\"\n"));
    assert!(script.contains("docker build -t acme/hello-app:latest .\n"));

    assert_eq!(read(workspace.path(), "helm/Chart.tpl"), "name: ${app_name}\n");
    assert!(workspace.path().join("ci/empty").is_dir());

    assert_eq!(
        summary.report,
        ProcessReport {
            directories: 5,
            copied: 1,
            rendered: 3,
        }
    );
}

#[cfg(unix)]
#[test]
fn test_rendered_scripts_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let templates = templates();
    let workspace = TempDir::new().unwrap();
    generate_pipeline(&config(templates.path(), workspace.path()), host(), AcceptDefaults).unwrap();

    let mode = std::fs::metadata(workspace.path().join("ci/tasks/build.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn test_summary_lists_values_in_request_order() {
    let templates = TemplateTree::new().file("a.yml", "${docker_tag} ${app_name} ${docker_tag}").build();
    let workspace = TempDir::new().unwrap();

    let summary =
        generate_pipeline(&config(templates.path(), workspace.path()), host(), AcceptDefaults)
            .unwrap();

    assert_eq!(
        summary.resolved,
        vec![
            ("docker_tag".to_string(), "latest".to_string()),
            ("app_name".to_string(), "hello-app".to_string()),
        ]
    );
    assert_eq!(
        summary.render(),
        "=========================\ndocker_tag = 'latest'\napp_name = 'hello-app'\n=========================\n"
    );
}

#[test]
fn test_operator_overrides_flow_into_every_file() {
    let templates = TemplateTree::new()
        .file("one.yml", "name: ${app_name}\n")
        .file("two.sh", "echo $${app_name}\n")
        .build();
    let workspace = TempDir::new().unwrap();
    let mut prompter = ScriptedPrompter::new(["renamed"]);

    generate_pipeline(&config(templates.path(), workspace.path()), host(), &mut prompter).unwrap();

    assert_eq!(read(workspace.path(), "one.yml"), "name: renamed\n");
    assert_eq!(read(workspace.path(), "two.sh"), "echo renamed\n");
    assert_eq!(prompter.asked().len(), 1);
}

#[test]
fn test_https_remote_aborts_when_git_user_needed() {
    let templates = TemplateTree::new().file("a.yml", "user: ${git_user}\n").build();
    let workspace = TempDir::new().unwrap();
    let host = Arc::new(StaticHost::new().with_remote("https://github.com/acme/hello-app.git"));

    let err = generate_pipeline(&config(templates.path(), workspace.path()), host, AcceptDefaults)
        .unwrap_err();
    assert!(err.to_string().contains("Unsupported repository URI"));
    assert!(!workspace.path().join("a.yml").exists());
}

#[test]
fn test_rerun_overwrites_previous_output() {
    let templates = TemplateTree::new().file("a.yml", "v: ${x}\n").build();
    let workspace = TempDir::new().unwrap();
    let cfg = config(templates.path(), workspace.path());

    generate_pipeline(&cfg, host(), ScriptedPrompter::new(["first"])).unwrap();
    generate_pipeline(&cfg, host(), ScriptedPrompter::new(["second"])).unwrap();

    assert_eq!(read(workspace.path(), "a.yml"), "v: second\n");
}
