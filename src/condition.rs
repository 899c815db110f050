//! Evaluation of `if` conditions
//!
//! By the time a condition reaches this module every variable has been
//! replaced by a `True`/`False` literal, so the grammar is plain boolean
//! algebra:
//!
//! ```text
//! expr    := and_expr ("or" and_expr)*
//! and_expr:= unary ("and" unary)*
//! unary   := "not" unary | primary
//! primary := "True" | "False" | "(" expr ")"
//! ```
//!
//! Literals and operators are matched case-insensitively. Anything else
//! (comparisons, arithmetic, stray words) is rejected rather than guessed at.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
enum TokenType {
    True,
    False,
    Not,
    And,
    Or,
    LeftParen,
    RightParen,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::True => write!(f, "True"),
            TokenType::False => write!(f, "False"),
            TokenType::Not => write!(f, "not"),
            TokenType::And => write!(f, "and"),
            TokenType::Or => write!(f, "or"),
            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
        }
    }
}

/// Why a condition could not be evaluated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionError {
    pub message: String,
}

impl ConditionError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn tokenize(input: &str) -> Result<Vec<TokenType>, ConditionError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(TokenType::LeftParen);
            }
            ')' => {
                chars.next();
                tokens.push(TokenType::RightParen);
            }
            c if c.is_alphanumeric() || c == '_' => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let word = &input[start..end];
                let token = match word.to_ascii_lowercase().as_str() {
                    "true" => TokenType::True,
                    "false" => TokenType::False,
                    "not" => TokenType::Not,
                    "and" => TokenType::And,
                    "or" => TokenType::Or,
                    _ => return Err(ConditionError::new(format!("unsupported word '{}'", word))),
                };
                tokens.push(token);
            }
            other => {
                return Err(ConditionError::new(format!(
                    "unsupported character '{}' at offset {}",
                    other, start
                )))
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<TokenType>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> Option<TokenType> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<TokenType> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn parse_or(&mut self) -> Result<bool, ConditionError> {
        let mut value = self.parse_and()?;
        while self.peek() == Some(TokenType::Or) {
            self.advance();
            let rhs = self.parse_and()?;
            value = value || rhs;
        }
        Ok(value)
    }

    fn parse_and(&mut self) -> Result<bool, ConditionError> {
        let mut value = self.parse_unary()?;
        while self.peek() == Some(TokenType::And) {
            self.advance();
            let rhs = self.parse_unary()?;
            value = value && rhs;
        }
        Ok(value)
    }

    fn parse_unary(&mut self) -> Result<bool, ConditionError> {
        if self.peek() == Some(TokenType::Not) {
            self.advance();
            return Ok(!self.parse_unary()?);
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<bool, ConditionError> {
        match self.advance() {
            Some(TokenType::True) => Ok(true),
            Some(TokenType::False) => Ok(false),
            Some(TokenType::LeftParen) => {
                let value = self.parse_or()?;
                match self.advance() {
                    Some(TokenType::RightParen) => Ok(value),
                    Some(other) => Err(ConditionError::new(format!("expected ')', found '{}'", other))),
                    None => Err(ConditionError::new("missing closing ')'")),
                }
            }
            Some(other) => Err(ConditionError::new(format!("unexpected '{}'", other))),
            None => Err(ConditionError::new("unexpected end of condition")),
        }
    }
}

/// Evaluate a condition made of `True`/`False`, `not`, `and`, `or` and parentheses
pub fn evaluate_condition(input: &str) -> Result<bool, ConditionError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ConditionError::new("empty condition"));
    }

    let mut parser = Parser {
        tokens,
        position: 0,
    };
    let value = parser.parse_or()?;

    if let Some(extra) = parser.peek() {
        return Err(ConditionError::new(format!("unexpected '{}' after expression", extra)));
    }
    Ok(value)
}
