//! pipegen - pipeline scaffold generator
//!
//! Renders a tree of CI pipeline templates (Concourse pipelines, task scripts,
//! Helm values) into an application repository. Every placeholder in the
//! templates is filled from a lazily-evaluated graph of defaults derived from the
//! project itself: the git remote and branch, the logged-in docker user, the local
//! kubeconfig. The operator confirms or overrides each default once, and the
//! answers can be persisted so the next run starts from them.
//!
//! # Architecture Overview
//!
//! ```text
//!   values file ──seed──┐
//!                        ▼
//!   HostProbe ──► ResolverGraph ──defaults──► InteractiveResolver ──► TemplateEngine
//!   (git, docker,   (catalog rules,             (Prompter: stdin        (walk, render,
//!    kubeconfig)     memo, cycles)               or accept-defaults)      copy, chmod)
//! ```
//!
//! # Core Modules
//!
//! - [`resolver`] - Rule graph, interactive decorator, prompters, derived catalog
//! - [`templating`] - Tree walker, placeholder extraction, rendering
//! - [`values`] - Values file load/save and YAML block-scalar escaping
//! - [`pipeline`] - One complete generation run
//! - [`host`] - Facts about the machine the defaults are derived from
//! - [`git`] - Read-only git queries
//! - [`config`] - `pipegen.toml` settings
//! - [`cli`] - `generate` and `vars` commands
//! - [`core`] - Error types and user-facing error reporting
//! - [`utils`] - File system and platform helpers
//!
//! # Placeholders
//!
//! | Files           | Syntax      |
//! |-----------------|-------------|
//! | `*.yml`/`*.yaml`| `${name}`   |
//! | `*.sh`          | `$${name}`  |
//!
//! Every other file is copied unchanged. Names nobody knows resolve to
//! `CHANGEME_<name>`.

pub mod cli;
pub mod config;
pub mod core;
pub mod git;
pub mod host;
pub mod pipeline;
pub mod resolver;
pub mod templating;
pub mod utils;
pub mod values;

// test_utils is available for tests and when the test-utils feature is enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
