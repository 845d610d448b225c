//! Resolver behavior through the public API.

use pipegen_cli::core::PipegenError;
use pipegen_cli::resolver::{
    AcceptDefaults, InteractiveResolver, Lookup, ResolverGraph, Rule, register_pipeline_rules,
};
use pipegen_cli::test_utils::{ScriptedPrompter, StaticHost, init_test_logging};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn acme_host() -> StaticHost {
    StaticHost::new()
        .with_remote("git@github.com:acme/hello-app.git")
        .with_branch("feature-login")
        .with_docker_info("Client:\n Version: 24.0\nServer:\n Username: acmebot\n")
}

#[test]
fn test_catalog_derivations_chain_from_host_facts() {
    init_test_logging(None);
    let mut graph = ResolverGraph::new();
    register_pipeline_rules(&mut graph, Arc::new(acme_host()));

    let mut get = |name: &str| graph.resolve(name).unwrap().unwrap_or_default();
    assert_eq!(get("docker_image"), "acmebot/hello-app:feature-login");
    assert_eq!(get("pipeline_name"), "hello-app-feature-login");
    assert_eq!(get("helm_release_name"), "hello-app-feature-login");
    assert_eq!(get("https_git_repo_uri"), "https://github.com/acme/hello-app.git");
    assert_eq!(get("git_user"), "acme");
}

#[test]
fn test_seeded_values_take_precedence_over_catalog() {
    let mut graph = ResolverGraph::new();
    register_pipeline_rules(&mut graph, Arc::new(acme_host()));
    graph.seed([("docker_user", "registry-user"), ("git_branch", "master")]);

    assert_eq!(
        graph.resolve("docker_image").unwrap().as_deref(),
        Some("registry-user/hello-app:latest")
    );
}

#[test]
fn test_custom_rule_registered_before_catalog_wins() {
    let mut graph = ResolverGraph::new();
    graph.add("app_name", Rule::constant("renamed"));
    register_pipeline_rules(&mut graph, Arc::new(acme_host()));

    assert_eq!(graph.resolve("pipeline_name").unwrap().as_deref(), Some("renamed-feature-login"));
}

#[test]
fn test_shared_dependency_computed_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut graph = ResolverGraph::new();
    graph.add(
        "app_name",
        Rule::source(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some("hello".to_string())
        }),
    );
    graph.add("git_branch", Rule::constant("main"));
    graph.add(
        "pipeline_name",
        Rule::derived(|lookup| {
            let app = lookup.resolve("app_name")?.unwrap_or_default();
            let branch = lookup.resolve("git_branch")?.unwrap_or_default();
            Ok(Some(format!("{app}-{branch}")))
        }),
    );
    graph.add(
        "docker_repo",
        Rule::derived(|lookup| Ok(lookup.resolve("app_name")?.map(|a| format!("me/{a}")))),
    );

    let mut resolver = InteractiveResolver::new(graph, AcceptDefaults);
    assert_eq!(resolver.resolve("pipeline_name").unwrap(), "hello-main");
    assert_eq!(resolver.resolve("docker_repo").unwrap(), "me/hello");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_cycle_surfaces_through_interactive_resolver() {
    let mut graph = ResolverGraph::new();
    graph.add("docker_repo", Rule::derived(|lookup| lookup.resolve("docker_image")));
    graph.add("docker_image", Rule::derived(|lookup| lookup.resolve("docker_repo")));

    let mut resolver = InteractiveResolver::new(graph, AcceptDefaults);
    let err = resolver.resolve("docker_image").unwrap_err();
    match err.downcast_ref::<PipegenError>() {
        Some(PipegenError::CyclicDependency {
            chain,
        }) => assert_eq!(chain, &["docker_image", "docker_repo", "docker_image"]),
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn test_unknown_names_get_placeholder_and_are_offered_as_default() {
    let mut prompter = ScriptedPrompter::new([""]);
    let mut resolver = InteractiveResolver::new(ResolverGraph::new(), &mut prompter);

    assert_eq!(resolver.resolve("slack_channel").unwrap(), "CHANGEME_slack_channel");
    drop(resolver);
    assert_eq!(
        prompter.asked(),
        &[("slack_channel".to_string(), Some("CHANGEME_slack_channel".to_string()))]
    );
}

#[test]
fn test_kube_config_is_taken_without_prompt() {
    let host = acme_host().with_kube_config("apiVersion: v1\nkind: Config\n");
    let mut graph = ResolverGraph::new();
    register_pipeline_rules(&mut graph, Arc::new(host));

    let mut prompter = ScriptedPrompter::new(["should-not-be-used"]);
    let mut resolver = InteractiveResolver::new(graph, &mut prompter);
    assert_eq!(resolver.resolve("kube_config").unwrap(), "apiVersion: v1\nkind: Config\n");
    drop(resolver);
    assert!(prompter.asked().is_empty());
}
