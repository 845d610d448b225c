//! Persisted variable values (`ci/secrets.yml` by default).
//!
//! The values file is a flat YAML mapping from variable name to value. Loaded
//! entries seed the resolver and take precedence over every derived default, so
//! an operator can pin a value once and stop being asked about it. Saving writes
//! the answers of a run back so the next run starts from them.
//!
//! Values are stored raw. Multi-line strings are written as YAML block scalars by
//! the serializer, so a kubeconfig survives a save/load round trip byte for byte.
//! [`block_scalar`] is the separate transform used when such a value is
//! substituted *into* a YAML template.
//!
//! ```yaml
//! app_name: hello-app
//! docker_tag: latest
//! kube_config: |
//!   apiVersion: v1
//!   kind: Config
//! ```

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::PipegenError;
use crate::utils::fs::{read_text_file, safe_write};

/// Name-to-value pairs read from, or written to, a values file.
pub type Values = BTreeMap<String, String>;

/// Load the values file at `path`.
///
/// A missing file is an empty set of values. Scalar values (strings, numbers,
/// booleans) are stringified; `null` entries are skipped.
///
/// # Errors
///
/// [`PipegenError::ValuesFileParse`] if the file is not valid YAML, is not a
/// mapping, or contains nested sequences or mappings.
pub fn load(path: &Path) -> Result<Values> {
    if !path.exists() {
        tracing::debug!("No values file at {}", path.display());
        return Ok(Values::new());
    }

    let content = read_text_file(path)?;
    let invalid = |reason: String| PipegenError::ValuesFileParse {
        path: path.display().to_string(),
        reason,
    };

    let document: Value = serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
    let mapping = match document {
        Value::Null => return Ok(Values::new()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(invalid("expected a mapping of names to values".to_string()).into()),
    };

    let mut values = Values::new();
    for (key, value) in mapping {
        let name = scalar_to_string(&key)
            .ok_or_else(|| invalid(format!("unsupported key {key:?}")))?;
        match value {
            Value::Null => {
                tracing::debug!("Skipping null value for '{}'", name);
            }
            other => {
                let value = scalar_to_string(&other)
                    .ok_or_else(|| invalid(format!("value of '{name}' is not a scalar")))?;
                values.insert(name, value);
            }
        }
    }

    tracing::info!("Loaded {} values from {}", values.len(), path.display());
    Ok(values)
}

/// Write `values` to `path`, creating parent directories as needed.
pub fn save(path: &Path, values: &Values) -> Result<()> {
    let content = serde_yaml::to_string(values).context("Failed to serialize values")?;
    safe_write(path, &content)
        .with_context(|| format!("Failed to write values file: {}", path.display()))?;
    tracing::info!("Saved {} values to {}", values.len(), path.display());
    Ok(())
}

/// Render a multi-line string as a YAML literal block scalar (`|`) indented two
/// spaces, with trailing whitespace trimmed.
#[must_use]
pub fn block_scalar(value: &str) -> String {
    format!("|\n  {}", value.replace('\n', "\n  ")).trim_end().to_string()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
