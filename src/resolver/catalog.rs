//! The derived variable catalog.
//!
//! Registers the default rules for the variables a CI pipeline template typically
//! needs. Only three facts come from the host (origin URL, branch, registry login)
//! plus the kubeconfig; everything else is derived from those.
//!
//! | Variable             | Default                                                  |
//! |----------------------|----------------------------------------------------------|
//! | `git_repo_uri`       | `git config --get remote.origin.url`                     |
//! | `https_git_repo_uri` | `git@host:owner/repo.git` rewritten to `https://host/...`|
//! | `git_branch`         | checked-out branch, else `master`                        |
//! | `app_name`           | last path segment of `git_repo_uri` without `.git`       |
//! | `docker_tag`         | `latest` on `master`, else the branch name               |
//! | `docker_user`        | `Username:` line of `docker info`, else `docker_user`    |
//! | `docker_repo`        | `<docker_user>/<app_name>`                               |
//! | `docker_image`       | `<docker_repo>:<docker_tag>`                             |
//! | `git_user`           | owner segment of an SSH `git_repo_uri`                   |
//! | `helm_release_name`  | `<app_name>-<git_branch>`                                |
//! | `pipeline_name`      | `<app_name>-<git_branch>`                                |
//! | `kube_config`        | kubeconfig contents, else an insertion marker            |

use anyhow::Result;
use regex::Regex;
use std::sync::{Arc, LazyLock};

use super::graph::{Lookup, ResolverGraph, Rule};
use crate::core::PipegenError;
use crate::host::HostProbe;

/// Branch assumed when git cannot report one.
pub const DEFAULT_BRANCH: &str = "master";

/// Fallback when `docker info` shows no logged-in user.
pub const DEFAULT_DOCKER_USER: &str = "docker_user";

/// Marker written in place of a missing kubeconfig.
pub const KUBE_CONFIG_MARKER: &str = "INSERT_FULL_CONTENTS_OF_KUBE_CONFIG_FILE";

static DOCKER_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Username: (.*)").unwrap());

/// Register every catalog rule on `graph`, probing `host` lazily.
pub fn register_pipeline_rules(graph: &mut ResolverGraph, host: Arc<dyn HostProbe>) {
    let probe = Arc::clone(&host);
    graph.add(
        "git_repo_uri",
        Rule::source(move || Some(probe.git_remote_url().trim().to_string())),
    );

    graph.add(
        "https_git_repo_uri",
        Rule::derived(|lookup| Ok(lookup.resolve("git_repo_uri")?.map(|uri| https_repo_uri(&uri)))),
    );

    let probe = Arc::clone(&host);
    graph.add(
        "git_branch",
        Rule::source(move || {
            let branch = probe.git_branch().trim().to_string();
            Some(if branch.is_empty() {
                DEFAULT_BRANCH.to_string()
            } else {
                branch
            })
        }),
    );

    graph.add(
        "app_name",
        Rule::derived(|lookup| {
            Ok(lookup.resolve("git_repo_uri")?.map(|uri| app_name_from_repo_uri(&uri)))
        }),
    );

    graph.add(
        "docker_tag",
        Rule::derived(|lookup| Ok(Some(tag_for_branch(lookup.resolve("git_branch")?.as_deref())))),
    );

    graph.add(
        "docker_repo",
        Rule::derived(|lookup| {
            let user = value(lookup, "docker_user")?;
            let app = value(lookup, "app_name")?;
            Ok(Some(format!("{user}/{app}")))
        }),
    );

    graph.add(
        "docker_image",
        Rule::derived(|lookup| {
            let repo = value(lookup, "docker_repo")?;
            let tag = value(lookup, "docker_tag")?;
            Ok(Some(format!("{repo}:{tag}")))
        }),
    );

    let probe = Arc::clone(&host);
    graph.add("docker_user", Rule::source(move || Some(docker_user_from_info(&probe.docker_info()))));

    graph.add(
        "git_user",
        Rule::derived(|lookup| {
            lookup.resolve("git_repo_uri")?.map(|uri| git_user_from_repo_uri(&uri)).transpose()
        }),
    );

    graph.add("helm_release_name", Rule::derived(app_and_branch));
    graph.add("pipeline_name", Rule::derived(app_and_branch));

    graph.add(
        "kube_config",
        Rule::source(move || Some(host.kube_config().unwrap_or_else(|| KUBE_CONFIG_MARKER.to_string()))),
    );
}

fn value(lookup: &mut dyn Lookup, name: &str) -> Result<String> {
    Ok(lookup.resolve(name)?.unwrap_or_default())
}

fn app_and_branch(lookup: &mut dyn Lookup) -> Result<Option<String>> {
    let app = value(lookup, "app_name")?;
    let branch = value(lookup, "git_branch")?;
    Ok(Some(format!("{app}-{branch}")))
}

/// Rewrite an SSH-style `git@host:owner/repo.git` URI to its HTTPS form.
///
/// Other URIs are returned unchanged.
#[must_use]
pub fn https_repo_uri(uri: &str) -> String {
    match uri.strip_prefix("git@") {
        Some(rest) => format!("https://{}", rest.replacen(':', "/", 1)),
        None => uri.to_string(),
    }
}

/// The final path segment of a repository URI, without a trailing `.git`.
#[must_use]
pub fn app_name_from_repo_uri(uri: &str) -> String {
    let trimmed = uri.strip_suffix(".git").unwrap_or(uri);
    match trimmed.rfind('/') {
        Some(slash) => trimmed[slash + 1..].to_string(),
        None => trimmed.to_string(),
    }
}

/// The owner segment between the first `:` and the next `/` of an SSH URI.
///
/// A URI without that shape is returned unchanged.
///
/// # Errors
///
/// [`PipegenError::UnsupportedRepoUri`] for `http(s)` URIs.
pub fn git_user_from_repo_uri(uri: &str) -> Result<String> {
    if uri.starts_with("http") {
        return Err(PipegenError::UnsupportedRepoUri {
            uri: uri.to_string(),
        }
        .into());
    }
    if let Some(colon) = uri.find(':') {
        let after = &uri[colon + 1..];
        if let Some(slash) = after.find('/') {
            return Ok(after[..slash].to_string());
        }
    }
    Ok(uri.to_string())
}

/// Docker tag for a branch: `latest` for `master`, the branch name otherwise.
#[must_use]
pub fn tag_for_branch(branch: Option<&str>) -> String {
    match branch {
        Some("master") => "latest".to_string(),
        Some(branch) if !branch.is_empty() => branch.to_string(),
        _ => DEFAULT_BRANCH.to_string(),
    }
}

/// Extract the logged-in registry user from `docker info` output.
#[must_use]
pub fn docker_user_from_info(info: &str) -> String {
    DOCKER_USERNAME
        .captures(info)
        .map(|caps| caps[1].trim().to_string())
        .filter(|user| !user.is_empty())
        .unwrap_or_else(|| DEFAULT_DOCKER_USER.to_string())
}
