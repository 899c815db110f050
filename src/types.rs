//! Core types and constants for the template engine

use std::fmt;

// Directive syntax
pub const DEFAULT_ESCAPE: char = '$';
pub const KEYWORDS: &[&str] = &["if", "else", "endif", "foreach", "endfor"];

// Placeholders emitted for unresolved input
pub const UNKNOWN_MARKER: &str = "<unknown>";
pub const FOREACH_FAILED_MARKER: &str = "<foreach failed>";

// Condition literals produced by boolean coercion
pub const TRUE_LITERAL: &str = " True ";
pub const FALSE_LITERAL: &str = " False ";

// Built-in defaults
pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y";
pub const LIST_DISPLAY_SEPARATOR: &str = ", ";

// Option files
pub const GLOBAL_OPTIONS_FILE: &str = ".codetemplrc";

/// Block directive keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Else,
    EndIf,
    Foreach,
    EndFor,
}

impl Keyword {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "if" => Some(Self::If),
            "else" => Some(Self::Else),
            "endif" => Some(Self::EndIf),
            "foreach" => Some(Self::Foreach),
            "endfor" => Some(Self::EndFor),
            _ => None,
        }
    }

    pub fn is_keyword(name: &str) -> bool {
        Self::from_name(name).is_some()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keyword::If => write!(f, "if"),
            Keyword::Else => write!(f, "else"),
            Keyword::EndIf => write!(f, "endif"),
            Keyword::Foreach => write!(f, "foreach"),
            Keyword::EndFor => write!(f, "endfor"),
        }
    }
}

/// Inferred type of a variable referenced by a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    List,
    String,
    Boolean,
    Unknown,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::List => write!(f, "list"),
            VariableKind::String => write!(f, "string"),
            VariableKind::Boolean => write!(f, "boolean"),
            VariableKind::Unknown => write!(f, "?"),
        }
    }
}
