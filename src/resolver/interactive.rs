//! Interactive decorator over a default-producing resolver.
//!
//! The template engine never talks to the [`ResolverGraph`](super::ResolverGraph)
//! directly. It asks an [`InteractiveResolver`], which takes the graph's answer as a
//! *default*, lets the operator accept or override it once, and remembers the
//! result for the rest of the run. Multi-line defaults (a kubeconfig, a certificate)
//! cannot be typed back on a single line, so they are taken verbatim without a
//! prompt.

use anyhow::Result;
use std::collections::HashMap;

use super::graph::Lookup;
use super::prompt::Prompter;

/// Anything the template engine can ask for a variable's final value.
pub trait VariableSource {
    /// The value to substitute for `name`.
    fn value_of(&mut self, name: &str) -> Result<String>;
}

/// Confirms each default with the operator exactly once per variable.
///
/// # Examples
///
/// ```rust
/// use pipegen_cli::resolver::{AcceptDefaults, InteractiveResolver, ResolverGraph, Rule};
/// use pipegen_cli::resolver::VariableSource;
///
/// # fn example() -> anyhow::Result<()> {
/// let mut graph = ResolverGraph::new();
/// graph.add("docker_tag", Rule::constant("latest"));
///
/// let mut resolver = InteractiveResolver::new(graph, AcceptDefaults);
/// assert_eq!(resolver.value_of("docker_tag")?, "latest");
/// assert_eq!(resolver.answers(), vec![("docker_tag", "latest")]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct InteractiveResolver<L, P> {
    defaults: L,
    prompter: P,
    answers: HashMap<String, String>,
    order: Vec<String>,
}

impl<L: Lookup, P: Prompter> InteractiveResolver<L, P> {
    /// Decorate `defaults`, confirming values through `prompter`.
    pub fn new(defaults: L, prompter: P) -> Self {
        Self {
            defaults,
            prompter,
            answers: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Resolve `name`, asking the operator the first time it is requested.
    ///
    /// An empty answer keeps the default. A variable with no default and an empty
    /// answer resolves to the empty string.
    ///
    /// # Errors
    ///
    /// Propagates resolver failures (cycles, unsupported URIs) and prompt failures.
    pub fn resolve(&mut self, name: &str) -> Result<String> {
        if let Some(answer) = self.answers.get(name) {
            return Ok(answer.clone());
        }

        let default = self.defaults.resolve(name)?.unwrap_or_default();
        let value = if default.contains('\n') {
            tracing::debug!("Using multi-line default for '{}' without prompting", name);
            default
        } else {
            let offered = Some(default.as_str()).filter(|d| !d.is_empty());
            let answer = self.prompter.ask(name, offered)?;
            if answer.is_empty() {
                default
            } else {
                answer
            }
        };

        self.order.push(name.to_string());
        self.answers.insert(name.to_string(), value.clone());
        Ok(value)
    }

    /// Every resolved variable, in the order it was first requested.
    #[must_use]
    pub fn answers(&self) -> Vec<(&str, &str)> {
        self.order
            .iter()
            .filter_map(|name| {
                self.answers.get(name).map(|value| (name.as_str(), value.as_str()))
            })
            .collect()
    }
}

impl<L: Lookup, P: Prompter> VariableSource for InteractiveResolver<L, P> {
    fn value_of(&mut self, name: &str) -> Result<String> {
        self.resolve(name)
    }
}
