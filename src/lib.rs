//! codetempl - source files from templates
//!
//! Templates are plain text with a small directive language, delimited by an
//! escape character (`$` by default):
//!
//! - `$name$` or `$name` - a user variable or built-in function
//! - `$date{"fmt": "%Y"}$` - a built-in with JSON parameters
//! - `$$if(cond) ... [$$else ...] $$endif` - conditional block
//! - `$$foreach($list$) ... $$endfor` - one copy of the body per list element
//!
//! Built-ins: `date`, `user`, `gituser`, `gitemail`, `filename`, `filepath`
//! and `guard`. Names are case-insensitive. Blocks cannot be nested.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use codetempl::{render, EscapeChar, TemplateConfig, UserVariables};
//! use std::path::Path;
//!
//! fn main() -> codetempl::Result<()> {
//!     let variables = UserVariables::from_pairs(["author:Jane Doe"])?;
//!     let config = TemplateConfig::new(EscapeChar::default(), variables);
//!
//!     let rendered = render("#ifndef $guard$\n// $author$\n", &config, Path::new("foo.h"))?;
//!     assert_eq!(rendered.text, "#ifndef H_FOO\n// Jane Doe\n");
//!     Ok(())
//! }
//! ```
//!
//! # Rendering Pipeline
//!
//! 1. **Conditionals** - conditions are reduced to `True`/`False` literals and
//!    evaluated with a restricted boolean grammar
//! 2. **Loops** - list variables expand their block bodies
//! 3. **Tokens** - built-ins and user variables are substituted
//!
//! Unknown variables render as `<unknown>` and are reported as warnings; a
//! malformed condition fails the template.

pub mod types;
pub mod error;
pub mod escape;
pub mod variables;
pub mod host;
pub mod functions;
pub mod condition;
pub mod rewriter;
pub mod resolver;
pub mod conditional;
pub mod foreach;
pub mod renderer;
pub mod extractor;
pub mod generator;
pub mod cli;

use std::path::Path;

// Re-export commonly used types and functions
pub use error::{Result, TemplateError};
pub use types::*;
pub use escape::{DirectivePatterns, EscapeChar};
pub use variables::{UserVariables, VariableValue};
pub use host::{Host, SystemHost};
pub use condition::{evaluate_condition, ConditionError};
pub use renderer::{RenderWarning, Rendered, Renderer};
pub use extractor::{ExtractedVariables, Extractor};
pub use generator::{FileOutcome, GenerationReport, Generator, GeneratorOptions, SkipReason};
pub use cli::Cli;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Settings shared by every template of a run
#[derive(Debug, Clone, Default)]
pub struct TemplateConfig {
    /// Character delimiting tokens and directives
    pub escape: EscapeChar,

    /// User variables, command-line pairs overlaid by the JSON file
    pub variables: UserVariables,
}

impl TemplateConfig {
    pub fn new(escape: EscapeChar, variables: UserVariables) -> Self {
        Self { escape, variables }
    }
}

/// Render one template for the file at `target`
pub fn render(template: &str, config: &TemplateConfig, target: &Path) -> Result<Rendered> {
    Renderer::new(config)?.render(template, target)
}

/// Classify the variables referenced by the given template files
pub fn extract_variables<P: AsRef<Path>>(paths: &[P], escape: EscapeChar) -> Result<ExtractedVariables> {
    Extractor::new(escape)?.extract_files(paths)
}
