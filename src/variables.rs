//! User variable table
//!
//! Variables come from two sources, applied in this order:
//! - `NAME:VALUE` pairs given on the command line (always scalar strings)
//! - a JSON object file, whose entries overwrite same-named command-line entries
//!
//! Names are case-insensitive and stored lower-cased. The table is built once
//! at startup and only read afterwards.

use crate::error::{Result, TemplateError};
use crate::types::LIST_DISPLAY_SEPARATOR;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// A user variable value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Bool(bool),
    Number(serde_json::Number),
    Scalar(String),
    List(Vec<String>),
}

impl VariableValue {
    /// Truthiness used by condition evaluation
    pub fn is_truthy(&self) -> bool {
        match self {
            VariableValue::Bool(b) => *b,
            VariableValue::Number(n) => n.as_f64().map_or(false, |v| v != 0.0),
            VariableValue::Scalar(s) => !s.is_empty(),
            VariableValue::List(items) => !items.is_empty(),
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            VariableValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Bool(b) => write!(f, "{}", b),
            VariableValue::Number(n) => write!(f, "{}", n),
            VariableValue::Scalar(s) => write!(f, "{}", s),
            VariableValue::List(items) => write!(f, "{}", items.join(LIST_DISPLAY_SEPARATOR)),
        }
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::Scalar(value.to_string())
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        VariableValue::Bool(value)
    }
}

impl From<Vec<String>> for VariableValue {
    fn from(value: Vec<String>) -> Self {
        VariableValue::List(value)
    }
}

/// Case-insensitive table of user variables
#[derive(Debug, Clone, Default)]
pub struct UserVariables {
    values: HashMap<String, VariableValue>,
}

impl UserVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from `NAME:VALUE` pairs
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (name, value) in parse_colon_mapping(pairs)? {
            table.insert(&name, VariableValue::Scalar(value));
        }
        Ok(table)
    }

    pub fn insert(&mut self, name: &str, value: impl Into<VariableValue>) {
        self.values.insert(name.to_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&VariableValue> {
        self.values.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay entries of a JSON object; existing names are replaced
    pub fn overlay_json_str(&mut self, json: &str) -> Result<()> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        for (name, value) in raw {
            let parsed = VariableValue::deserialize(&value).map_err(|_| {
                TemplateError::InvalidVariable {
                    name: name.clone(),
                    message: format!(
                        "expected a string, boolean, number or list of strings, found {}",
                        value
                    ),
                }
            })?;
            self.insert(&name, parsed);
        }
        Ok(())
    }

    pub fn overlay_json_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|e| TemplateError::FileNotFound {
            path: format!("{}: {}", path.display(), e),
        })?;
        self.overlay_json_str(&content)?;
        log::info!("Loaded user variables from {}", path.display());
        Ok(())
    }
}

/// Split `NAME:VALUE` arguments into pairs; anything but exactly one colon is rejected
pub fn parse_colon_mapping<I, S>(args: I) -> Result<Vec<(String, String)>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|arg| {
            let arg = arg.as_ref();
            let parts: Vec<&str> = arg.split(':').collect();
            match parts.as_slice() {
                [name, value] => Ok((name.to_string(), value.to_string())),
                _ => Err(TemplateError::invalid_mapping(arg)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pairs_are_case_insensitive() {
        let vars = UserVariables::from_pairs(["Author:Jane", "license:MIT"]).unwrap();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("author"), Some(&VariableValue::from("Jane")));
        assert_eq!(vars.get("AUTHOR"), Some(&VariableValue::from("Jane")));
        assert!(vars.contains("License"));
    }

    #[test]
    fn test_invalid_mapping() {
        assert!(UserVariables::from_pairs(["novalue"]).is_err());
        assert!(UserVariables::from_pairs(["a:b:c"]).is_err());
        assert!(parse_colon_mapping(["h:header.h", "cpp:source.cpp"]).is_ok());
    }

    #[test]
    fn test_json_overlays_pairs() {
        let mut vars = UserVariables::from_pairs(["author:cli", "keep:me"]).unwrap();
        vars.overlay_json_str(
            r#"{"AUTHOR": "json", "debug": true, "count": 0, "items": ["a", "b"]}"#,
        )
        .unwrap();

        assert_eq!(vars.get("author"), Some(&VariableValue::from("json")));
        assert_eq!(vars.get("keep"), Some(&VariableValue::from("me")));
        assert_eq!(vars.get("debug"), Some(&VariableValue::Bool(true)));
        assert!(!vars.get("count").unwrap().is_truthy());
        assert_eq!(
            vars.get("items").and_then(|v| v.as_list()),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn test_json_rejects_objects() {
        let mut vars = UserVariables::new();
        let result = vars.overlay_json_str(r#"{"nested": {"a": 1}}"#);
        assert!(matches!(result, Err(TemplateError::InvalidVariable { .. })));
        assert!(vars.overlay_json_str("[1, 2]").is_err());
    }

    #[test]
    fn test_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vars.json");
        fs::write(&path, r#"{"project": "demo"}"#).unwrap();

        let mut vars = UserVariables::new();
        vars.overlay_json_file(&path).unwrap();
        assert_eq!(vars.get("PROJECT").unwrap().to_string(), "demo");

        let missing = vars.overlay_json_file(&temp_dir.path().join("missing.json"));
        assert!(matches!(missing, Err(TemplateError::FileNotFound { .. })));
    }

    #[test]
    fn test_truthiness() {
        assert!(!VariableValue::from("").is_truthy());
        assert!(VariableValue::from("0").is_truthy());
        assert!(!VariableValue::Bool(false).is_truthy());
        assert!(!VariableValue::List(Vec::new()).is_truthy());
        assert!(VariableValue::List(vec!["x".to_string()]).is_truthy());
        assert_eq!(
            VariableValue::List(vec!["a".to_string(), "b".to_string()]).to_string(),
            "a, b"
        );
    }
}
