//! Deterministic stand-ins for the host and the operator.

use anyhow::Result;
use std::collections::VecDeque;

use crate::host::HostProbe;
use crate::resolver::Prompter;

/// A [`HostProbe`] answering from fixed strings.
///
/// Everything is empty (no remote, no branch, no docker login, no kubeconfig)
/// until set.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    remote: String,
    branch: String,
    docker_info: String,
    kube_config: Option<String>,
}

impl StaticHost {
    /// A host with no git, docker or kubeconfig state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `origin` remote URL.
    #[must_use]
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Set the checked-out branch.
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Set the `docker info` output.
    #[must_use]
    pub fn with_docker_info(mut self, info: impl Into<String>) -> Self {
        self.docker_info = info.into();
        self
    }

    /// Set the kubeconfig contents.
    #[must_use]
    pub fn with_kube_config(mut self, content: impl Into<String>) -> Self {
        self.kube_config = Some(content.into());
        self
    }
}

impl HostProbe for StaticHost {
    fn git_remote_url(&self) -> String {
        self.remote.clone()
    }

    fn git_branch(&self) -> String {
        self.branch.clone()
    }

    fn docker_info(&self) -> String {
        self.docker_info.clone()
    }

    fn kube_config(&self) -> Option<String> {
        self.kube_config.clone()
    }
}

/// A [`Prompter`] replaying canned answers.
///
/// Answers are consumed in order; once they run out every question gets an
/// empty answer (keep the default). Each question is recorded as
/// `(name, offered default)`.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<(String, Option<String>)>,
}

impl ScriptedPrompter {
    /// A prompter that will give `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Every question asked so far.
    #[must_use]
    pub fn asked(&self) -> &[(String, Option<String>)] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, name: &str, default: Option<&str>) -> Result<String> {
        self.asked.push((name.to_string(), default.map(str::to_string)));
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
