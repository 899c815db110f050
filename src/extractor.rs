//! Static discovery of the variables a set of templates expects
//!
//! Nothing is rendered. Each referenced name is classified by how it is used,
//! with the strongest signal winning:
//!
//! - loop source (`$$foreach($x$)`) => list
//! - inside a quoted literal (`"... $x$ ..."`) => string, unless already a list
//! - inside an `$$if(...)` header => boolean, if not classified yet (or still unknown)
//! - anywhere else => unknown (`?`), if not classified yet
//!
//! Files are processed in order and share one map, so a later file can
//! upgrade what an earlier one found. Keywords and built-in functions are
//! dropped from the result.

use crate::error::Result;
use crate::escape::{DirectivePatterns, EscapeChar};
use crate::functions;
use crate::types::{Keyword, VariableKind};
use regex::Regex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Variable name (lower-cased) to inferred kind, sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedVariables {
    variables: BTreeMap<String, VariableKind>,
}

impl ExtractedVariables {
    pub fn get(&self, name: &str) -> Option<VariableKind> {
        self.variables.get(&name.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, VariableKind)> {
        self.variables.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// JSON object with a sample value per kind: `[]`, `""`, `false` or `"?"`.
    /// The shape matches what `--vars-json` accepts, so the output can be
    /// used as a starting point for a variables file.
    pub fn to_json(&self) -> Result<String> {
        let object: Map<String, Value> = self
            .variables
            .iter()
            .map(|(name, kind)| {
                let sample = match kind {
                    VariableKind::List => Value::Array(Vec::new()),
                    VariableKind::String => Value::String(String::new()),
                    VariableKind::Boolean => Value::Bool(false),
                    VariableKind::Unknown => Value::String("?".to_string()),
                };
                (name.clone(), sample)
            })
            .collect();

        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        Value::Object(object).serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn classify(&mut self, name: &str, kind: VariableKind) {
        let name = name.to_lowercase();
        let current = self.variables.get(&name).copied();
        let replace = match kind {
            VariableKind::List => true,
            VariableKind::String => current != Some(VariableKind::List),
            VariableKind::Boolean => matches!(current, None | Some(VariableKind::Unknown)),
            VariableKind::Unknown => current.is_none(),
        };
        if replace {
            self.variables.insert(name, kind);
        }
    }

    fn remove_reserved(&mut self) {
        self.variables
            .retain(|name, _| !Keyword::is_keyword(name) && !functions::is_builtin(name));
    }
}

pub struct Extractor {
    patterns: DirectivePatterns,
    quoted: Regex,
}

impl Extractor {
    pub fn new(escape: EscapeChar) -> Result<Self> {
        Ok(Self {
            patterns: DirectivePatterns::new(escape)?,
            quoted: Regex::new(r#""[^"\n]*"|'[^'\n]*'"#)?,
        })
    }

    /// Scan template files; missing files are skipped with a warning
    pub fn extract_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<ExtractedVariables> {
        let mut found = ExtractedVariables::default();
        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                log::warn!("Template file {} does not exist, skipping", path.display());
                continue;
            }
            let content = fs::read_to_string(path)?;
            log::debug!("Extracting variables from {}", path.display());
            self.scan(&content, &mut found);
        }
        found.remove_reserved();
        Ok(found)
    }

    /// Scan in-memory template texts
    pub fn extract_sources<S: AsRef<str>>(&self, sources: &[S]) -> ExtractedVariables {
        let mut found = ExtractedVariables::default();
        for source in sources {
            self.scan(source.as_ref(), &mut found);
        }
        found.remove_reserved();
        found
    }

    fn scan(&self, content: &str, found: &mut ExtractedVariables) {
        for caps in self.patterns.foreach.captures_iter(content) {
            if let Some(var) = caps.get(1) {
                found.classify(var.as_str(), VariableKind::List);
            }
        }

        for literal in self.quoted.find_iter(content) {
            for name in self.token_names(literal.as_str()) {
                found.classify(name, VariableKind::String);
            }
        }

        for caps in self.patterns.condition.captures_iter(content) {
            if let Some(condition) = caps.get(1) {
                for name in self.token_names(condition.as_str()) {
                    found.classify(name, VariableKind::Boolean);
                }
            }
        }

        for name in self.token_names(content) {
            found.classify(name, VariableKind::Unknown);
        }
    }

    fn token_names<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.patterns
            .token
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
    }
}
