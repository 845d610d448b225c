//! Generator settings file (`pipegen.toml`).
//!
//! Every field is optional; an absent field falls back to the built-in default
//! shown below, and command-line flags override both.
//!
//! ```toml
//! templates = "templates"
//! output = "."
//! values_file = "ci/secrets.yml"
//! kube_config = "~/.kube/config"
//! docker_command = "docker"
//! placeholder_prefix = "CHANGEME_"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::PipegenError;
use crate::resolver::DEFAULT_PLACEHOLDER_PREFIX;
use crate::utils::platform::resolve_path;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "pipegen.toml";

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV_VAR: &str = "PIPEGEN_CONFIG";

/// Default template root.
pub const DEFAULT_TEMPLATES: &str = "templates";

/// Default values file.
pub const DEFAULT_VALUES_FILE: &str = "ci/secrets.yml";

/// Default kubeconfig location.
pub const DEFAULT_KUBE_CONFIG: &str = "~/.kube/config";

/// Default container tool.
pub const DEFAULT_DOCKER_COMMAND: &str = "docker";

/// Generator settings as read from `pipegen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Template tree to render
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,

    /// Directory the rendered tree is written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Values file seeding (and optionally receiving) resolved values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_file: Option<PathBuf>,

    /// Kubeconfig read for `kube_config`; `~` and `$VAR` are expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kube_config: Option<String>,

    /// Container tool queried for the registry user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_command: Option<String>,

    /// Prefix for variables no rule knows about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_prefix: Option<String>,
}

impl GeneratorConfig {
    /// Load settings.
    ///
    /// An explicit `path` must exist. Without one, `pipegen.toml` in the working
    /// directory is used if present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// [`PipegenError::ConfigError`] if the explicit file is missing or any file
    /// cannot be parsed.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(PipegenError::ConfigError {
                        message: format!("Config file not found: {}", path.display()),
                    }
                    .into());
                }
                Self::load_from(path).await
            }
            None => {
                let default = PathBuf::from(CONFIG_FILE_NAME);
                if default.exists() {
                    Self::load_from(&default).await
                } else {
                    tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load settings from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = toml::from_str(&content).map_err(|e| PipegenError::ConfigError {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `overrides` on top of these settings; every field set in
    /// `overrides` wins.
    #[must_use]
    pub fn merge_overrides(self, overrides: Self) -> Self {
        Self {
            templates: overrides.templates.or(self.templates),
            output: overrides.output.or(self.output),
            values_file: overrides.values_file.or(self.values_file),
            kube_config: overrides.kube_config.or(self.kube_config),
            docker_command: overrides.docker_command.or(self.docker_command),
            placeholder_prefix: overrides.placeholder_prefix.or(self.placeholder_prefix),
        }
    }

    /// Effective template root.
    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        self.templates.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES))
    }

    /// Effective output directory.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Effective values file.
    #[must_use]
    pub fn values_path(&self) -> PathBuf {
        self.values_file.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_VALUES_FILE))
    }

    /// Effective kubeconfig path, or `None` if it cannot be expanded (for example
    /// `~` with no home directory).
    #[must_use]
    pub fn kube_config_path(&self) -> Option<PathBuf> {
        let raw = self.kube_config.as_deref().unwrap_or(DEFAULT_KUBE_CONFIG);
        match resolve_path(raw) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Ignoring kubeconfig path '{}': {:#}", raw, e);
                None
            }
        }
    }

    /// Effective container tool.
    #[must_use]
    pub fn docker_command(&self) -> &str {
        self.docker_command.as_deref().unwrap_or(DEFAULT_DOCKER_COMMAND)
    }

    /// Effective placeholder prefix.
    #[must_use]
    pub fn placeholder_prefix(&self) -> &str {
        self.placeholder_prefix.as_deref().unwrap_or(DEFAULT_PLACEHOLDER_PREFIX)
    }
}
