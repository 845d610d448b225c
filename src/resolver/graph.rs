//! Lazily-evaluated, memoized dependency graph of named values.
//!
//! A [`ResolverGraph`] maps variable names to an ordered list of [`Rule`]s. Nothing is
//! computed until a name is requested; the first non-empty result is memoized for
//! the rest of the session. Derived rules receive a [`Lookup`] so they can request
//! other variables, and the graph tracks the chain of in-flight names to reject
//! cycles before they recurse forever.
//!
//! # Resolution algorithm
//!
//! 1. A cached name returns immediately; its rules are never re-invoked.
//! 2. A name already on the resolution chain fails with
//!    [`PipegenError::CyclicDependency`] carrying the full chain.
//! 3. A name with no rules resolves to the placeholder `CHANGEME_<name>`.
//! 4. Otherwise the rules run in registration order until one yields a non-empty
//!    value.
//! 5. Non-empty results are cached; empty or absent ones are not, so a later caller
//!    can still supply a value.
//!
//! # Examples
//!
//! ```rust
//! use pipegen_cli::resolver::{Lookup, ResolverGraph, Rule};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut graph = ResolverGraph::new();
//! graph.add("docker_repo", Rule::source(|| Some("acme".to_string())));
//! graph.add("docker_tag", Rule::source(|| Some("latest".to_string())));
//! graph.add(
//!     "docker_image",
//!     Rule::derived(|lookup| {
//!         let repo = lookup.resolve("docker_repo")?.unwrap_or_default();
//!         let tag = lookup.resolve("docker_tag")?.unwrap_or_default();
//!         Ok(Some(format!("{repo}:{tag}")))
//!     }),
//! );
//!
//! assert_eq!(graph.resolve("docker_image")?.as_deref(), Some("acme:latest"));
//! assert_eq!(graph.resolve("unknown")?.as_deref(), Some("CHANGEME_unknown"));
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;

use crate::core::PipegenError;

/// Default prefix for variables that have no registered rule.
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "CHANGEME_";

/// The `resolve`-only view of a resolver handed to derived rules.
///
/// Returns `Ok(None)` when nothing produced a value, `Ok(Some(""))` when a rule
/// produced an empty value, and an error when resolution must abort (a cycle, or a
/// rule that failed outright).
pub trait Lookup {
    /// Resolve `name`, computing it (and anything it depends on) if necessary.
    fn resolve(&mut self, name: &str) -> Result<Option<String>>;
}

type SourceFn = Box<dyn Fn() -> Option<String> + Send + Sync>;
type DerivedFn = Box<dyn Fn(&mut dyn Lookup) -> Result<Option<String>> + Send + Sync>;

/// A named computation producing a variable's value.
pub enum Rule {
    /// Takes no input, e.g. "run this external command".
    Source(SourceFn),
    /// Computes its value from other variables through a [`Lookup`].
    Derived(DerivedFn),
}

impl Rule {
    /// Wrap a closure that needs no other variables.
    pub fn source<F>(f: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self::Source(Box::new(f))
    }

    /// Wrap a closure that may resolve other variables.
    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Lookup) -> Result<Option<String>> + Send + Sync + 'static,
    {
        Self::Derived(Box::new(f))
    }

    /// A rule that always yields `value`.
    pub fn constant(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::source(move || Some(value.clone()))
    }

    fn evaluate(&self, lookup: &mut dyn Lookup) -> Result<Option<String>> {
        match self {
            Self::Source(f) => Ok(f()),
            Self::Derived(f) => f(lookup),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(_) => f.write_str("Rule::Source"),
            Self::Derived(_) => f.write_str("Rule::Derived"),
        }
    }
}

/// Mutable per-session state: the memo cache and the active resolution chain.
#[derive(Debug)]
struct SessionState {
    cache: HashMap<String, String>,
    chain: Vec<String>,
    placeholder_prefix: String,
}

/// Registry of resolver rules plus the session that evaluates them.
///
/// Construct one per run, register rules, optionally [`seed`](Self::seed) it from
/// the values file, then resolve names on demand.
#[derive(Debug)]
pub struct ResolverGraph {
    rules: HashMap<String, Vec<Rule>>,
    state: SessionState,
}

impl Default for ResolverGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverGraph {
    /// An empty graph using the `CHANGEME_` placeholder prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::with_placeholder_prefix(DEFAULT_PLACEHOLDER_PREFIX)
    }

    /// An empty graph whose unknown variables resolve to `<prefix><name>`.
    #[must_use]
    pub fn with_placeholder_prefix(prefix: impl Into<String>) -> Self {
        Self {
            rules: HashMap::new(),
            state: SessionState {
                cache: HashMap::new(),
                chain: Vec::new(),
                placeholder_prefix: prefix.into(),
            },
        }
    }

    /// Register a rule for `name`.
    ///
    /// Rules for the same name form a fallback chain in registration order: the
    /// first-registered rule wins and later ones are consulted only when every
    /// earlier rule yields nothing.
    pub fn add(&mut self, name: impl Into<String>, rule: Rule) -> &mut Self {
        self.rules.entry(name.into()).or_default().push(rule);
        self
    }

    /// Seed the memo cache with known values.
    ///
    /// Seeded entries take precedence over every rule: a seeded name's rules are
    /// never invoked. Entries are stored verbatim, including empty strings.
    pub fn seed<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in values {
            self.state.cache.insert(name.into(), value.into());
        }
    }

    /// The memoized value of `name`, if it has been resolved or seeded.
    #[must_use]
    pub fn cached(&self, name: &str) -> Option<&str> {
        self.state.cache.get(name).map(String::as_str)
    }

    /// Resolve `name` as a top-level request.
    ///
    /// # Errors
    ///
    /// - [`PipegenError::CyclicDependency`] if a rule depends on itself
    /// - Any error a rule raises while computing its value
    pub fn resolve(&mut self, name: &str) -> Result<Option<String>> {
        self.state.chain.clear();
        Resolution {
            rules: &self.rules,
            state: &mut self.state,
        }
        .resolve(name)
    }
}

impl Lookup for ResolverGraph {
    fn resolve(&mut self, name: &str) -> Result<Option<String>> {
        ResolverGraph::resolve(self, name)
    }
}

/// A single in-flight resolution: shared rules, exclusive session state.
///
/// Splitting the borrow this way lets a rule borrowed from the registry receive
/// the resolver itself as its [`Lookup`].
struct Resolution<'a> {
    rules: &'a HashMap<String, Vec<Rule>>,
    state: &'a mut SessionState,
}

impl Resolution<'_> {
    fn evaluate(&mut self, name: &str) -> Result<Option<String>> {
        let rules = self.rules;
        let Some(candidates) = rules.get(name) else {
            return Ok(Some(format!("{}{}", self.state.placeholder_prefix, name)));
        };

        let mut last = None;
        for rule in candidates {
            match rule.evaluate(self)? {
                Some(value) if !value.is_empty() => return Ok(Some(value)),
                other => last = other,
            }
        }
        Ok(last)
    }
}

impl Lookup for Resolution<'_> {
    fn resolve(&mut self, name: &str) -> Result<Option<String>> {
        if let Some(value) = self.state.cache.get(name) {
            return Ok(Some(value.clone()));
        }

        if self.state.chain.iter().any(|n| n == name) {
            let mut chain = self.state.chain.clone();
            chain.push(name.to_string());
            return Err(PipegenError::CyclicDependency {
                chain,
            }
            .into());
        }

        self.state.chain.push(name.to_string());
        let result = self.evaluate(name);
        self.state.chain.pop();
        let resolved = result?;

        match resolved.as_deref() {
            Some(value) => tracing::info!("{} => '{}'", name, value),
            None => tracing::info!("{} => <none>", name),
        }

        if let Some(value) = resolved.as_ref().filter(|v| !v.is_empty()) {
            self.state.cache.insert(name.to_string(), value.clone());
        }
        Ok(resolved)
    }
}
