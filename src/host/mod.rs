//! External sources of default values
//!
//! The derived variable catalog needs a few facts about the machine it runs on:
//! the git origin URL and branch, the container registry login, and the local
//! kubeconfig. [`HostProbe`] is the seam for those facts. Every query returns a
//! plain string that is empty when the fact is unavailable, so a missing remote or
//! a logged-out docker daemon degrades the defaults instead of failing the run.
//!
//! [`SystemHost`] is the real implementation; tests substitute fixed values.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::git::GitRepo;

/// Read-only queries against the operator's environment.
pub trait HostProbe: Send + Sync {
    /// URL of the `origin` remote of the current repository, or empty.
    fn git_remote_url(&self) -> String;

    /// Currently checked-out branch name, or empty.
    fn git_branch(&self) -> String;

    /// Output of the container tool's `info` command, or empty.
    fn docker_info(&self) -> String;

    /// Full contents of the kubeconfig file, if it exists and is readable.
    fn kube_config(&self) -> Option<String>;
}

/// [`HostProbe`] backed by the real `git`, `docker` and filesystem.
#[derive(Debug, Clone)]
pub struct SystemHost {
    repo: GitRepo,
    docker_command: String,
    kube_config_path: Option<PathBuf>,
}

impl SystemHost {
    /// Probe the repository at `repo_dir`, using `docker_command` for registry
    /// info and reading the kubeconfig from `kube_config_path`.
    pub fn new(
        repo_dir: impl Into<PathBuf>,
        docker_command: impl Into<String>,
        kube_config_path: Option<PathBuf>,
    ) -> Self {
        Self {
            repo: GitRepo::new(repo_dir.into()),
            docker_command: docker_command.into(),
            kube_config_path,
        }
    }
}

impl HostProbe for SystemHost {
    fn git_remote_url(&self) -> String {
        self.repo.remote_origin_url().unwrap_or_else(|e| {
            tracing::warn!("No git origin remote found: {:#}", e);
            String::new()
        })
    }

    fn git_branch(&self) -> String {
        self.repo.current_branch().unwrap_or_else(|e| {
            tracing::debug!("Could not determine git branch: {:#}", e);
            String::new()
        })
    }

    fn docker_info(&self) -> String {
        let program = match which::which(&self.docker_command) {
            Ok(program) => program,
            Err(_) => {
                tracing::warn!("'{}' not found in PATH; docker user will use a placeholder", self.docker_command);
                return String::new();
            }
        };

        tracing::debug!("Executing command: {} info", program.display());
        // Exit status is deliberately ignored: `docker info` prints the client
        // section (including Username) even when the daemon is unreachable.
        match Command::new(&program)
            .arg("info")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
        {
            Ok(output) => String::from_utf8_lossy(&output.stdout).to_string(),
            Err(e) => {
                tracing::warn!("Failed to run {} info: {}", self.docker_command, e);
                String::new()
            }
        }
    }

    fn kube_config(&self) -> Option<String> {
        let path = self.kube_config_path.as_ref()?;
        if !path.is_file() {
            tracing::debug!("No kubeconfig at {}", path.display());
            return None;
        }
        match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!("Failed to read kubeconfig {}: {}", path.display(), e);
                None
            }
        }
    }
}
