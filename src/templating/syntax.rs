//! Placeholder syntaxes, chosen by file suffix.
//!
//! YAML files use `${name}`. Shell scripts use `$${name}` so that ordinary
//! `${VAR}` shell expansions pass through untouched.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::values::block_scalar;

static YAML_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+)\}").unwrap());

static SHELL_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$\{(\w+)\}").unwrap());

/// A template dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// `.yml` / `.yaml`: `${name}`
    Yaml,
    /// `.sh`: `$${name}`
    Shell,
}

impl Syntax {
    /// The syntax for `path`, or `None` if the file is copied verbatim.
    ///
    /// Matching is a case-sensitive suffix test on the file name.
    #[must_use]
    pub fn for_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".yml") || name.ends_with(".yaml") {
            Some(Self::Yaml)
        } else if name.ends_with(".sh") {
            Some(Self::Shell)
        } else {
            None
        }
    }

    /// Pattern matching one placeholder; capture group 1 is the variable name.
    #[must_use]
    pub fn pattern(self) -> &'static Regex {
        match self {
            Self::Yaml => &YAML_PLACEHOLDER,
            Self::Shell => &SHELL_PLACEHOLDER,
        }
    }

    /// Whether rendered output gets the executable bit.
    #[must_use]
    pub const fn is_executable(self) -> bool {
        matches!(self, Self::Shell)
    }

    /// Prepare `value` for substitution into a file of this syntax.
    ///
    /// Multi-line values in YAML become a literal block scalar so the document
    /// stays valid; shell scripts get the value verbatim.
    #[must_use]
    pub fn escape(self, value: &str) -> String {
        match self {
            Self::Yaml if value.contains('\n') => block_scalar(value),
            _ => value.to_string(),
        }
    }
}
