//! Configuration for pipegen.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. The settings file: `--config <path>`, else `$PIPEGEN_CONFIG`, else
//!    `./pipegen.toml` when it exists
//! 3. Command-line flags (`--templates`, `--output`, `--values`)
//!
//! Variable *values* are not configuration; they live in the values file (see
//! [`crate::values`]).

pub mod generator;

pub use generator::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, GeneratorConfig};
