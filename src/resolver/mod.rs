//! Variable resolution for pipeline templates.
//!
//! Every `${name}` token in a template is answered by a two-layer resolver:
//!
//! 1. A [`ResolverGraph`] computes a *default* for each name from registered
//!    [`Rule`]s. Rules are lazy, memoized and may depend on each other; the
//!    [`catalog`] registers the stock pipeline variables (`app_name`,
//!    `docker_image`, `kube_config`, ...). Values loaded from the values file are
//!    seeded into the graph and win over every rule.
//! 2. An [`InteractiveResolver`] wraps the graph and lets the operator confirm or
//!    override each default once, through a [`Prompter`].
//!
//! Names with no rule never fail: they resolve to `CHANGEME_<name>` so the
//! generated files still show what has to be filled in.
//!
//! # Cycles
//!
//! Rules that depend on each other in a loop are reported as
//! [`PipegenError::CyclicDependency`](crate::core::PipegenError::CyclicDependency)
//! with the full chain instead of overflowing the stack. Cycles are only detected
//! when evaluated: a cyclic rule that nothing asks for is harmless.
//!
//! # Examples
//!
//! ```rust
//! use pipegen_cli::resolver::{AcceptDefaults, InteractiveResolver, ResolverGraph, Rule};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut graph = ResolverGraph::new();
//! graph.add("git_branch", Rule::constant("main"));
//! graph.seed([("app_name", "hello")]);
//!
//! let mut resolver = InteractiveResolver::new(graph, AcceptDefaults);
//! assert_eq!(resolver.resolve("app_name")?, "hello");
//! assert_eq!(resolver.resolve("git_branch")?, "main");
//! assert_eq!(resolver.resolve("region")?, "CHANGEME_region");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod graph;
pub mod interactive;
pub mod prompt;

pub use catalog::register_pipeline_rules;
pub use graph::{DEFAULT_PLACEHOLDER_PREFIX, Lookup, ResolverGraph, Rule};
pub use interactive::{InteractiveResolver, VariableSource};
pub use prompt::{AcceptDefaults, LinePrompter, Prompter, StdinPrompter};
