//! Command-line interface for pipegen.
//!
//! # Available Commands
//!
//! - `generate` - Render the pipeline template tree into the current project,
//!   confirming each variable's default interactively
//! - `vars` - List the variables each template file references
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only log errors
//! - `--config <path>` - Settings file (also `$PIPEGEN_CONFIG`); defaults to
//!   `./pipegen.toml` when present
//!
//! # Examples
//!
//! ```bash
//! # Generate interactively into the current directory
//! pipegen generate
//!
//! # Accept every default and remember the answers for next time
//! pipegen generate --defaults --save
//!
//! # See what a template tree will ask for
//! pipegen vars --templates ./templates
//! ```
//!
//! Log output goes to stderr; prompts and the final summary go to stdout.

mod generate;
mod vars;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GeneratorConfig;

pub use generate::GenerateCommand;
pub use vars::VarsCommand;

/// Runtime settings derived from the global flags.
///
/// Separated from [`Cli`] so tests can run a command with an explicit log level
/// and settings path.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` defers to `RUST_LOG`, then `info`.
    pub log_level: Option<String>,

    /// Explicit settings file.
    pub config_path: Option<PathBuf>,
}

/// Pipeline scaffold generator.
#[derive(Parser)]
#[command(
    name = "pipegen",
    about = "Generate CI pipeline configuration from a template tree",
    version,
    long_about = "pipegen renders a tree of pipeline templates into your project, deriving \
                  defaults for every variable from git, docker and kubectl and letting you \
                  confirm or override each one."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a settings file.
    #[arg(short, long, global = true, env = "PIPEGEN_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the template tree into the output directory.
    ///
    /// See [`GenerateCommand`] for options.
    Generate(GenerateCommand),

    /// List the variables referenced by each template file.
    ///
    /// See [`VarsCommand`] for options.
    Vars(VarsCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with explicit runtime settings.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        init_logging(config.log_level.as_deref());

        let settings = GeneratorConfig::load(config.config_path.as_deref()).await?;
        match self.command {
            Commands::Generate(cmd) => cmd.execute(settings).await,
            Commands::Vars(cmd) => cmd.execute(settings).await,
        }
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `level` wins when given; otherwise `RUST_LOG` is honored, falling back to
/// `info`. Only the first call in a process has any effect.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
