//! Creating files from templates
//!
//! For each requested file the template is chosen by the file's extension
//! (`--map-ext h:header.templ`) and looked up in the search directories in
//! order. A problem with one file is reported and the batch moves on.

use crate::error::{Result, TemplateError};
use crate::renderer::{RenderWarning, Renderer};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// File extension (without dot) to template file name
    pub extension_map: HashMap<String, String>,
    /// Directories searched for template files, first match wins
    pub search_dirs: Vec<PathBuf>,
    /// Overwrite existing files
    pub force: bool,
}

impl GeneratorOptions {
    /// Find the template file for `extension` in the search directories
    pub fn find_template(&self, extension: &str) -> Option<PathBuf> {
        let name = self.extension_map.get(extension)?;
        self.search_dirs
            .iter()
            .map(|dir| absolute(dir).join(name))
            .find(|candidate| candidate.is_file())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoTemplateMapping { extension: String },
    AlreadyExists,
    TemplateNotFound { template: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoTemplateMapping { extension } => {
                write!(f, "no template for extension .{}", extension)
            }
            SkipReason::AlreadyExists => write!(f, "file exists"),
            SkipReason::TemplateNotFound { template } => write!(f, "no path found for {}", template),
        }
    }
}

#[derive(Debug)]
pub enum FileOutcome {
    Written {
        path: PathBuf,
        template: PathBuf,
        warnings: Vec<RenderWarning>,
    },
    Skipped {
        path: PathBuf,
        reason: SkipReason,
    },
    Failed {
        path: PathBuf,
        error: TemplateError,
    },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Written { path, .. }
            | FileOutcome::Skipped { path, .. }
            | FileOutcome::Failed { path, .. } => path,
        }
    }
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<FileOutcome>,
}

impl GenerationReport {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Written { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

pub struct Generator<'a> {
    renderer: Renderer<'a>,
    options: &'a GeneratorOptions,
}

impl<'a> Generator<'a> {
    pub fn new(renderer: Renderer<'a>, options: &'a GeneratorOptions) -> Self {
        Self { renderer, options }
    }

    pub fn generate<P: AsRef<Path>>(&self, files: &[P]) -> GenerationReport {
        let mut report = GenerationReport::default();
        for file in files {
            let path = absolute(file.as_ref());
            let outcome = match self.generate_file(&path) {
                Ok(outcome) => outcome,
                Err(error) => {
                    log::error!("{}: {}", path.display(), error);
                    FileOutcome::Failed { path, error }
                }
            };
            report.outcomes.push(outcome);
        }
        report
    }

    fn generate_file(&self, path: &Path) -> Result<FileOutcome> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(template_name) = self.options.extension_map.get(&extension) else {
            return Ok(skip(path, SkipReason::NoTemplateMapping { extension }));
        };

        if !self.options.force && path.exists() {
            return Ok(skip(path, SkipReason::AlreadyExists));
        }

        let Some(template) = self.options.find_template(&extension) else {
            return Ok(skip(
                path,
                SkipReason::TemplateNotFound {
                    template: template_name.clone(),
                },
            ));
        };

        let content = fs::read_to_string(&template)?;
        let rendered = self.renderer.render(&content, path)?;
        fs::write(path, &rendered.text)?;

        log::info!("Created {} from {}", path.display(), template.display());
        Ok(FileOutcome::Written {
            path: path.to_path_buf(),
            template,
            warnings: rendered.warnings,
        })
    }
}

fn skip(path: &Path, reason: SkipReason) -> FileOutcome {
    log::warn!("{}: {}, skipping", path.display(), reason);
    FileOutcome::Skipped {
        path: path.to_path_buf(),
        reason,
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
