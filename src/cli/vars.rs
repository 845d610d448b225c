//! `pipegen vars`: show what a template tree will ask for.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::templating::scan_variables;

/// List the variables each template file references, in order of first use.
#[derive(Args, Debug, Default)]
pub struct VarsCommand {
    /// Template tree to inspect [default: templates]
    #[arg(short, long)]
    templates: Option<PathBuf>,
}

impl VarsCommand {
    /// Run the command with `config` as the base settings.
    pub async fn execute(self, config: GeneratorConfig) -> Result<()> {
        let root = config
            .merge_overrides(GeneratorConfig {
                templates: self.templates,
                ..Default::default()
            })
            .templates_dir();

        let scan_root = root.clone();
        let found = tokio::task::spawn_blocking(move || scan_variables(&scan_root))
            .await
            .context("Template scan failed")??;

        if found.is_empty() {
            println!("No template files found in {}", root.display());
            return Ok(());
        }

        for (path, names) in &found {
            println!("{}", path.display().to_string().bold());
            if names.is_empty() {
                println!("  {}", "(no variables)".dimmed());
            }
            for name in names {
                println!("  {name}");
            }
        }
        Ok(())
    }
}
