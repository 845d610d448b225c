//! Template tree rendering.
//!
//! The [`TemplateEngine`] mirrors a template directory into an output directory.
//! Directories are recreated, files whose name ends in `.yml`, `.yaml` or `.sh`
//! are rendered, and everything else is copied byte for byte.
//!
//! # Placeholder syntax
//!
//! | File suffix       | Placeholder | Example                      |
//! |-------------------|-------------|------------------------------|
//! | `.yml`, `.yaml`   | `${name}`   | `image: ${docker_image}`     |
//! | `.sh`             | `$${name}`  | `docker push $${docker_image}` |
//!
//! Names are word characters only (`[A-Za-z0-9_]`). Every distinct name in a file
//! is resolved once, in order of first appearance, before any substitution
//! happens, so prompts follow the reading order of the template.
//!
//! # Output naming
//!
//! A leading `_` is stripped from a file's name (`_pipeline.yml` becomes
//! `pipeline.yml`). Directory names are kept as they are. Rendered `.sh` files
//! are made executable (`0755`).
//!
//! Existing output files are overwritten. Nothing in the output directory that
//! has no counterpart in the template tree is touched.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pipegen_cli::resolver::{AcceptDefaults, InteractiveResolver, ResolverGraph};
//! use pipegen_cli::templating::TemplateEngine;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut resolver = InteractiveResolver::new(ResolverGraph::new(), AcceptDefaults);
//! let report = TemplateEngine::new(&mut resolver, "templates", ".").process()?;
//! println!("rendered {} files", report.rendered);
//! # Ok(())
//! # }
//! ```

pub mod extractor;
pub mod syntax;
pub mod walker;

use anyhow::Result;
use regex::Captures;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::PipegenError;
use crate::resolver::VariableSource;
use crate::utils::fs::{copy_file, ensure_dir, read_text_file, set_executable, write_text_file};

pub use extractor::extract_variables;
pub use syntax::Syntax;
pub use walker::{WalkHandler, walk};

/// Counts of what a [`TemplateEngine::process`] run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReport {
    /// Directories created or confirmed in the output tree (including the root)
    pub directories: usize,
    /// Files copied verbatim
    pub copied: usize,
    /// Files rendered from templates
    pub rendered: usize,
}

/// Renders a template tree into an output directory.
pub struct TemplateEngine<'a, S: ?Sized> {
    source: &'a mut S,
    templates: PathBuf,
    output: PathBuf,
    report: ProcessReport,
}

impl<'a, S: VariableSource + ?Sized> TemplateEngine<'a, S> {
    /// An engine reading `templates`, writing `output`, and asking `source` for
    /// variable values.
    pub fn new(source: &'a mut S, templates: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source,
            templates: templates.into(),
            output: output.into(),
            report: ProcessReport::default(),
        }
    }

    /// Render the whole tree.
    ///
    /// Stops at the first error; files written before it are left in place.
    ///
    /// # Errors
    ///
    /// - [`PipegenError::TemplateRootNotFound`] if the template root is not a directory
    /// - Resolution errors from the variable source
    /// - I/O errors while reading templates or writing output
    pub fn process(mut self) -> Result<ProcessReport> {
        if !self.templates.is_dir() {
            return Err(PipegenError::TemplateRootNotFound {
                path: self.templates.display().to_string(),
            }
            .into());
        }

        tracing::info!(
            "Rendering templates from {} into {}",
            self.templates.display(),
            self.output.display()
        );
        let templates = self.templates.clone();
        walk(&templates, &mut self)?;
        Ok(self.report)
    }
}

impl<S: VariableSource + ?Sized> WalkHandler for TemplateEngine<'_, S> {
    fn on_dir(&mut self, path: &Path, relative: &Path) -> Result<()> {
        tracing::debug!("d: {}", path.display());
        ensure_dir(&self.output.join(relative))?;
        self.report.directories += 1;
        Ok(())
    }

    fn on_file(&mut self, path: &Path, relative: &Path) -> Result<()> {
        tracing::debug!("f: {}", path.display());
        let target = output_path(&self.output, relative);

        match Syntax::for_path(path) {
            Some(syntax) => {
                let content = read_text_file(path)?;
                let rendered = render(&content, syntax, &mut *self.source)?;
                write_text_file(&target, &rendered)?;
                if syntax.is_executable() {
                    set_executable(&target)?;
                }
                self.report.rendered += 1;
            }
            None => {
                copy_file(path, &target)?;
                self.report.copied += 1;
            }
        }
        Ok(())
    }
}

/// Substitute every placeholder of `syntax` in `content` with its value.
///
/// Names are resolved first (each once, in order of first appearance), then all
/// occurrences are replaced. Values are escaped for the target syntax (see
/// [`Syntax::escape`]).
pub fn render<S: VariableSource + ?Sized>(
    content: &str,
    syntax: Syntax,
    source: &mut S,
) -> Result<String> {
    let pattern = syntax.pattern();
    let mut values = HashMap::new();
    for name in extract_variables(content, pattern) {
        let value = source.value_of(&name)?;
        values.insert(name, value);
    }

    let rendered = pattern.replace_all(content, |caps: &Captures| match values.get(&caps[1]) {
        Some(value) => syntax.escape(value),
        None => caps[0].to_string(),
    });
    Ok(rendered.into_owned())
}

/// Where the template at `relative` is written under `output`.
///
/// A single leading `_` is removed from the file name, unless the name is just
/// `_`.
#[must_use]
pub fn output_path(output: &Path, relative: &Path) -> PathBuf {
    let target = output.join(relative);
    let stripped = target
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_prefix('_'))
        .filter(|rest| !rest.is_empty())
        .map(str::to_string);
    match stripped {
        Some(name) => target.with_file_name(name),
        None => target,
    }
}

/// The placeholders each template file under `root` references.
///
/// Returns `(relative path, variable names)` for every file that would be
/// rendered, in walk order. Non-template files are left out.
pub fn scan_variables(root: &Path) -> Result<Vec<(PathBuf, Vec<String>)>> {
    struct Scanner {
        found: Vec<(PathBuf, Vec<String>)>,
    }

    impl WalkHandler for Scanner {
        fn on_dir(&mut self, _path: &Path, _relative: &Path) -> Result<()> {
            Ok(())
        }

        fn on_file(&mut self, path: &Path, relative: &Path) -> Result<()> {
            if let Some(syntax) = Syntax::for_path(path) {
                let content = read_text_file(path)?;
                let names = extract_variables(&content, syntax.pattern());
                self.found.push((relative.to_path_buf(), names));
            }
            Ok(())
        }
    }

    if !root.is_dir() {
        return Err(PipegenError::TemplateRootNotFound {
            path: root.display().to_string(),
        }
        .into());
    }

    let mut scanner = Scanner {
        found: Vec::new(),
    };
    walk(root, &mut scanner)?;
    Ok(scanner.found)
}
