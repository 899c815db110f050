//! Escape character handling and the directive patterns built from it

use crate::error::{Result, TemplateError};
use crate::types::DEFAULT_ESCAPE;
use regex::Regex;
use std::fmt;

/// The character delimiting tokens (`$name$`) and directives (`$$if`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeChar(char);

impl EscapeChar {
    pub fn new(ch: char) -> Result<Self> {
        if ch.is_alphanumeric() || ch == '_' {
            return Err(TemplateError::InvalidEscape {
                escape: ch.to_string(),
                message: "word characters cannot delimit variable names".to_string(),
            });
        }
        if ch.is_whitespace() {
            return Err(TemplateError::InvalidEscape {
                escape: ch.escape_default().to_string(),
                message: "whitespace cannot be used as escape character".to_string(),
            });
        }
        Ok(Self(ch))
    }

    /// Parse a command-line value, which must be exactly one character
    pub fn parse(value: &str) -> Result<Self> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::new(ch),
            _ => Err(TemplateError::InvalidEscape {
                escape: value.to_string(),
                message: "expected a single character".to_string(),
            }),
        }
    }

    pub fn as_char(&self) -> char {
        self.0
    }

    /// Regex-safe form of the escape character
    pub fn pattern(&self) -> String {
        regex::escape(&self.0.to_string())
    }
}

impl Default for EscapeChar {
    fn default() -> Self {
        Self(DEFAULT_ESCAPE)
    }
}

impl fmt::Display for EscapeChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compiled directive patterns for one escape character
#[derive(Debug, Clone)]
pub struct DirectivePatterns {
    pub escape: EscapeChar,
    /// `EnameE?`, group 1 is the name
    pub token: Regex,
    /// `{...}` parameter object directly at the match position
    pub params: Regex,
    /// `EEif(cond) body1 [EEelse body2] EEendif`
    pub condition: Regex,
    /// `EEforeach(EvarE) body EEendfor`
    pub foreach: Regex,
}

impl DirectivePatterns {
    pub fn new(escape: EscapeChar) -> Result<Self> {
        let e = escape.pattern();
        Ok(Self {
            escape,
            token: Regex::new(&format!(r"{e}(\w+){e}?"))?,
            params: Regex::new(r"\A\{[^}\n]*\}")?,
            condition: Regex::new(&format!(
                r"(?ms){e}{e}if\s*\((.*?)\)\s*^(.*?)(?:{e}{e}else\s*^(.*?))?{e}{e}endif\s?"
            ))?,
            foreach: Regex::new(&format!(
                r"(?ms){e}{e}foreach\s*\(\s*{e}(\w+){e}?\s*\)\s*^(.*?){e}{e}endfor\s?"
            ))?,
        })
    }

    /// Pattern matching the loop variable `var` inside a loop body
    pub fn loop_variable(&self, var: &str) -> Result<Regex> {
        let e = self.escape.pattern();
        let name = regex::escape(var);
        Ok(Regex::new(&format!(r"(?i){e}{name}(?:{e}|\b)"))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_validation() {
        assert!(EscapeChar::new('$').is_ok());
        assert!(EscapeChar::new('%').is_ok());
        assert!(EscapeChar::new('a').is_err());
        assert!(EscapeChar::new('_').is_err());
        assert!(EscapeChar::new(' ').is_err());
        assert!(EscapeChar::parse("$$").is_err());
        assert!(EscapeChar::parse("").is_err());
        assert_eq!(EscapeChar::parse("@").unwrap().as_char(), '@');
    }

    #[test]
    fn test_regex_special_escape() {
        let patterns = DirectivePatterns::new(EscapeChar::new('^').unwrap()).unwrap();
        let caps = patterns.token.captures("x ^name^ y").unwrap();
        assert_eq!(&caps[1], "name");
        assert_eq!(caps.get(0).unwrap().as_str(), "^name^");
    }

    #[test]
    fn test_token_trailing_escape_is_optional() {
        let patterns = DirectivePatterns::new(EscapeChar::default()).unwrap();
        let caps = patterns.token.captures("by $user, today").unwrap();
        assert_eq!(caps.get(0).unwrap().as_str(), "$user");
    }

    #[test]
    fn test_condition_pattern() {
        let patterns = DirectivePatterns::new(EscapeChar::default()).unwrap();
        let text = "$$if($a$ and ($b$))\nyes\n$$else\nno\n$$endif\nrest";
        let caps = patterns.condition.captures(text).unwrap();
        assert_eq!(&caps[1], "$a$ and ($b$)");
        assert_eq!(&caps[2], "yes\n");
        assert_eq!(&caps[3], "no\n");
        assert_eq!(&text[caps.get(0).unwrap().end()..], "rest");
    }

    #[test]
    fn test_loop_variable_pattern() {
        let patterns = DirectivePatterns::new(EscapeChar::default()).unwrap();
        let re = patterns.loop_variable("item").unwrap();
        assert!(re.is_match("$ITEM$"));
        assert!(re.is_match("$item;"));
        assert!(!re.is_match("$items$"));
    }
}
