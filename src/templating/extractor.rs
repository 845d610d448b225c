//! Placeholder discovery.

use regex::Regex;
use std::collections::HashSet;

/// Every distinct variable name referenced in `content`, in order of first use.
///
/// `pattern` must capture the variable name in group 1 (see
/// [`Syntax::pattern`](super::Syntax::pattern)).
#[must_use]
pub fn extract_variables(content: &str, pattern: &Regex) -> Vec<String> {
    let mut seen = HashSet::new();
    pattern
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
