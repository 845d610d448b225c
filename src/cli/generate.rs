//! `pipegen generate`: render the template tree.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::GeneratorConfig;
use crate::host::{HostProbe, SystemHost};
use crate::pipeline::{GenerationSummary, generate_pipeline};
use crate::resolver::{AcceptDefaults, StdinPrompter};
use crate::values;

/// Render the pipeline template tree into the project.
///
/// Each variable the templates reference is resolved to a default (values file
/// first, then git/docker/kubeconfig derivations, then a `CHANGEME_` placeholder)
/// and shown for confirmation. Press enter to keep the default.
///
/// # Examples
///
/// ```bash
/// pipegen generate
/// pipegen generate --templates ../pipeline-templates --output .
/// pipegen generate --defaults --save
/// ```
#[derive(Args, Debug, Default)]
pub struct GenerateCommand {
    /// Template tree to render [default: templates]
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Directory to write the rendered tree to [default: .]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Values file seeding the defaults [default: ci/secrets.yml]
    #[arg(long)]
    values: Option<PathBuf>,

    /// Accept every default without prompting
    #[arg(short = 'y', long)]
    defaults: bool,

    /// Write the resolved values back to the values file
    #[arg(long)]
    save: bool,
}

impl GenerateCommand {
    fn overrides(&self) -> GeneratorConfig {
        GeneratorConfig {
            templates: self.templates.clone(),
            output: self.output.clone(),
            values_file: self.values.clone(),
            ..Default::default()
        }
    }

    /// Run the command with `config` as the base settings.
    pub async fn execute(self, config: GeneratorConfig) -> Result<()> {
        let config = config.merge_overrides(self.overrides());
        let host: Arc<dyn HostProbe> =
            Arc::new(SystemHost::new(".", config.docker_command(), config.kube_config_path()));

        let summary = self.run(config.clone(), host).await?;
        print!("{}", summary.render());

        if self.save {
            let path = config.values_path();
            values::save(&path, &summary.merged_values())?;
            println!("{} Saved {} values to {}", "✓".green(), summary.resolved.len(), path.display());
        }

        println!(
            "{} Generated {} files into {}",
            "✓".green(),
            summary.report.rendered + summary.report.copied,
            config.output_dir().display()
        );
        Ok(())
    }

    async fn run(&self, config: GeneratorConfig, host: Arc<dyn HostProbe>) -> Result<GenerationSummary> {
        let accept_defaults = self.defaults;
        tokio::task::spawn_blocking(move || {
            if accept_defaults {
                generate_pipeline(&config, host, AcceptDefaults)
            } else {
                generate_pipeline(&config, host, StdinPrompter::stdio())
            }
        })
        .await
        .context("Generation task failed")?
    }
}
