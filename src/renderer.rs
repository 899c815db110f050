//! Template rendering pipeline
//!
//! Every template goes through three passes, always in this order:
//!
//! 1. conditionals (`$$if ... $$endif`), so a condition can drop a whole loop
//! 2. loops (`$$foreach ... $$endfor`), whose bodies may contain tokens
//! 3. tokens (`$name$`), resolved against built-ins and user variables
//!
//! Directive blocks are single-level; see [`crate::conditional`] and
//! [`crate::foreach`].

use crate::conditional::expand_conditions;
use crate::error::Result;
use crate::escape::DirectivePatterns;
use crate::foreach::expand_loops;
use crate::host::{Host, SystemHost};
use crate::resolver::{resolve_tokens, ResolveMode};
use crate::variables::UserVariables;
use crate::TemplateConfig;
use std::fmt;
use std::path::Path;

static SYSTEM_HOST: SystemHost = SystemHost;

/// Non-fatal problems found while rendering one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    UnknownVariable { name: String },
    UnknownLoopVariable { name: String },
    NotAList { name: String },
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::UnknownVariable { name } => write!(f, "unknown variable {}", name),
            RenderWarning::UnknownLoopVariable { name } => {
                write!(f, "unknown variable {} in foreach", name)
            }
            RenderWarning::NotAList { name } => write!(f, "variable {} is not a list", name),
        }
    }
}

/// Output of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub warnings: Vec<RenderWarning>,
}

/// Read-only state shared by the rendering passes for one target file
pub struct RenderContext<'a> {
    pub patterns: &'a DirectivePatterns,
    pub variables: &'a UserVariables,
    pub host: &'a dyn Host,
    pub target: &'a Path,
}

pub struct Renderer<'a> {
    config: &'a TemplateConfig,
    host: &'a dyn Host,
    patterns: DirectivePatterns,
}

impl<'a> Renderer<'a> {
    /// Renderer using the real clock, environment and git
    pub fn new(config: &'a TemplateConfig) -> Result<Self> {
        Self::with_host(config, &SYSTEM_HOST)
    }

    pub fn with_host(config: &'a TemplateConfig, host: &'a dyn Host) -> Result<Self> {
        Ok(Self {
            config,
            host,
            patterns: DirectivePatterns::new(config.escape)?,
        })
    }

    /// Render `template` for the file at `target`.
    ///
    /// Fails only for problems that would make the output wrong (malformed
    /// conditions, malformed function parameters); unknown variables are
    /// reported as warnings and rendered as placeholders.
    pub fn render(&self, template: &str, target: &Path) -> Result<Rendered> {
        let ctx = RenderContext {
            patterns: &self.patterns,
            variables: &self.config.variables,
            host: self.host,
            target,
        };
        let mut warnings = Vec::new();

        let text = expand_conditions(&ctx, template, &mut warnings)?;
        let text = expand_loops(&ctx, &text, &mut warnings)?;
        let text = resolve_tokens(&ctx, &text, ResolveMode::Normal, &mut warnings)?;

        log::debug!(
            "Rendered {} ({} bytes, {} warnings)",
            target.display(),
            text.len(),
            warnings.len()
        );
        Ok(Rendered { text, warnings })
    }
}
