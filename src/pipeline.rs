//! One complete generation run.
//!
//! Wires the pieces together: build the default graph from the catalog, seed it
//! from the values file, wrap it for interactive confirmation, render the
//! template tree, and report what was resolved.

use anyhow::Result;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::config::GeneratorConfig;
use crate::host::HostProbe;
use crate::resolver::{InteractiveResolver, Prompter, ResolverGraph, register_pipeline_rules};
use crate::templating::{ProcessReport, TemplateEngine};
use crate::values::{self, Values};

/// Separator line around the printed summary.
pub const SUMMARY_RULE: &str = "=========================";

/// Outcome of [`generate_pipeline`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Every variable the templates used, with its final value, in the order
    /// first requested
    pub resolved: Vec<(String, String)>,
    /// Values loaded from the values file before the run
    pub seeded: Values,
    /// What the template engine did
    pub report: ProcessReport,
}

impl GenerationSummary {
    /// The seeded values overlaid with this run's answers, ready to persist.
    #[must_use]
    pub fn merged_values(&self) -> Values {
        let mut merged = self.seeded.clone();
        for (name, value) in &self.resolved {
            merged.insert(name.clone(), value.clone());
        }
        merged
    }

    /// Human-readable summary: one `name = 'value'` line per resolved variable,
    /// between separator lines.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{SUMMARY_RULE}");
        for (name, value) in &self.resolved {
            let _ = writeln!(out, "{name} = '{value}'");
        }
        let _ = writeln!(out, "{SUMMARY_RULE}");
        out
    }
}

/// Build the default resolver for `config`: catalog rules plus seeded values.
///
/// Returns the graph and the values that were seeded into it.
pub fn default_resolver(
    config: &GeneratorConfig,
    host: Arc<dyn HostProbe>,
) -> Result<(ResolverGraph, Values)> {
    let mut graph = ResolverGraph::with_placeholder_prefix(config.placeholder_prefix());
    register_pipeline_rules(&mut graph, host);

    let seeded = values::load(&config.values_path())?;
    graph.seed(seeded.clone());
    Ok((graph, seeded))
}

/// Render the configured template tree, asking `prompter` to confirm each value.
///
/// # Errors
///
/// Fails on the first resolution, prompt or I/O error. Files written before the
/// failure are left in place.
pub fn generate_pipeline<P: Prompter>(
    config: &GeneratorConfig,
    host: Arc<dyn HostProbe>,
    prompter: P,
) -> Result<GenerationSummary> {
    let (graph, seeded) = default_resolver(config, host)?;
    let mut resolver = InteractiveResolver::new(graph, prompter);

    let report =
        TemplateEngine::new(&mut resolver, config.templates_dir(), config.output_dir()).process()?;
    tracing::info!(
        "Generated pipeline: {} rendered, {} copied, {} directories",
        report.rendered,
        report.copied,
        report.directories
    );

    let resolved = resolver
        .answers()
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    Ok(GenerationSummary {
        resolved,
        seeded,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_render() {
        let summary = GenerationSummary {
            resolved: vec![
                ("app_name".to_string(), "hello".to_string()),
                ("docker_tag".to_string(), "latest".to_string()),
            ],
            ..Default::default()
        };

        assert_eq!(
            summary.render(),
            "=========================\napp_name = 'hello'\ndocker_tag = 'latest'\n=========================\n"
        );
    }

    #[test]
    fn test_merged_values_prefers_answers() {
        let mut seeded = Values::new();
        seeded.insert("app_name".to_string(), "old".to_string());
        seeded.insert("unused".to_string(), "kept".to_string());
        let summary = GenerationSummary {
            resolved: vec![("app_name".to_string(), "new".to_string())],
            seeded,
            ..Default::default()
        };

        let merged = summary.merged_values();
        assert_eq!(merged.get("app_name").map(String::as_str), Some("new"));
        assert_eq!(merged.get("unused").map(String::as_str), Some("kept"));
    }
}
