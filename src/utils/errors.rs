//! Error types for FitLang.
//!
//! Each phase has its own error type and the taxonomies never mix: the
//! parser only produces [`ParseError`], the analyzer only produces
//! [`SemanticError`]. [`FitLangError`] wraps them for callers that run the
//! whole pipeline.

use crate::frontend::ast::NodeKind;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::location::Span;
use std::fmt;
use thiserror::Error;

/// Top-level error type for the pipeline.
#[derive(Error, Debug)]
pub enum FitLangError {
    /// Error during lexing
    #[error("Lexer error: {0}")]
    Lexer(#[from] LexerError),

    /// Error during parsing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error during semantic analysis
    #[error("Semantic error: {0}")]
    Semantic(#[from] SemanticError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FitLangError {
    /// Source span of the error, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            FitLangError::Lexer(e) => Some(e.span),
            FitLangError::Parse(e) => Some(e.span),
            FitLangError::Semantic(e) => Some(e.span),
            FitLangError::Io(_) => None,
        }
    }
}

/// Error during lexical analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
    /// The kind of lexer error
    pub kind: LexerErrorKind,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

/// Classification of lexer failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerErrorKind {
    /// Character that starts no token
    UnexpectedChar,
    /// String literal without a closing quote
    UnterminatedString,
    /// Unknown escape sequence in a string literal
    InvalidEscape,
    /// `/*` comment without a matching `*/`
    UnterminatedComment,
}

/// Error during parsing.
///
/// Carries the production being attempted, the token kinds that would have
/// been accepted, and the token that was actually found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
    /// The kind of parse error
    pub kind: ParseErrorKind,
    /// Grammar production being parsed (e.g. `"exercise"`)
    pub production: &'static str,
    /// Token kinds that would have been accepted
    pub expected: Vec<TokenKind>,
    /// The offending token
    pub found: Token,
}

impl ParseError {
    /// A token that no alternative of `production` accepts.
    pub fn unexpected(production: &'static str, expected: &[TokenKind], found: &Token) -> Self {
        Self {
            message: format!("Unexpected {} in {}", found, production),
            span: found.span,
            kind: ParseErrorKind::UnexpectedToken,
            production,
            expected: expected.to_vec(),
            found: found.clone(),
        }
    }

    /// Input ended before the closing `}` of a block.
    pub fn unterminated(production: &'static str, found: &Token) -> Self {
        Self {
            message: format!("Unterminated {} block", production),
            span: found.span,
            kind: ParseErrorKind::UnterminatedBlock,
            production,
            expected: vec![TokenKind::RightBrace],
            found: found.clone(),
        }
    }

    /// `sets` or `rest` given twice for the same exercise.
    pub fn duplicate_attribute(found: &Token) -> Self {
        Self {
            message: format!("Duplicate '{}' attribute in exercise", found.kind),
            span: found.span,
            kind: ParseErrorKind::DuplicateExerciseAttribute,
            production: "exercise",
            expected: Vec::new(),
            found: found.clone(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)?;
        if !self.expected.is_empty() {
            let expected: Vec<&str> = self.expected.iter().map(|k| k.name()).collect();
            write!(f, " (expected: {})", expected.join(", "))?;
        }
        Ok(())
    }
}

/// Classification of syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Token not accepted at this point of the grammar
    UnexpectedToken,
    /// End of input inside a `{ ... }` block
    UnterminatedBlock,
    /// `sets` or `rest` appeared twice in one exercise
    DuplicateExerciseAttribute,
}

/// Error during semantic analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
    /// The kind of semantic error
    pub kind: SemanticErrorKind,
    /// The symbol (or exercise) name the error is about
    pub name: String,
    /// The kind of node that failed its check
    pub node: NodeKind,
}

impl SemanticError {
    /// `name` is already registered.
    pub fn redeclaration(name: &str, node: NodeKind, span: Span) -> Self {
        Self {
            message: format!("Redeclaration of symbol '{}' in {}", name, node),
            span,
            kind: SemanticErrorKind::RedeclarationOfSymbol,
            name: name.to_string(),
            node,
        }
    }

    /// `name` does not resolve to a declared client.
    pub fn undefined(name: &str, node: NodeKind, span: Span) -> Self {
        Self {
            message: format!("Undefined client '{}' in {}", name, node),
            span,
            kind: SemanticErrorKind::UndefinedIdentifier,
            name: name.to_string(),
            node,
        }
    }

    /// Exercise with non-positive sets or rest.
    pub fn invalid_exercise(name: &str, sets: i64, rest: i64, span: Span) -> Self {
        Self {
            message: format!(
                "Invalid exercise '{}': sets ({}) and rest ({}) must be positive",
                name, sets, rest
            ),
            span,
            kind: SemanticErrorKind::InvalidExerciseDefinition,
            name: name.to_string(),
            node: NodeKind::Exercise,
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

/// Classification of semantic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    /// Name already present in the symbol table
    RedeclarationOfSymbol,
    /// Reference to a client that was never declared
    UndefinedIdentifier,
    /// Exercise whose sets or rest is not positive
    InvalidExerciseDefinition,
}

/// Result type using FitLangError.
pub type FitResult<T> = Result<T, FitLangError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let found = Token::new(TokenKind::Identifier, "Daniel", Span::new(1, 5, 1, 11));
        let err = ParseError::unexpected("statement", &[TokenKind::ClientProfile], &found);
        let s = err.to_string();
        assert!(s.contains("Unexpected identifier 'Daniel' in statement"));
        assert!(s.contains("1:5-11"));
        assert!(s.contains("expected: ClientProfile"));
    }

    #[test]
    fn test_semantic_error_carries_context() {
        let err = SemanticError::undefined("Ghost", NodeKind::ShowPlans, Span::dummy());
        assert_eq!(err.kind, SemanticErrorKind::UndefinedIdentifier);
        assert_eq!(err.name, "Ghost");
        assert_eq!(err.node, NodeKind::ShowPlans);
        assert!(err.to_string().contains("Undefined client 'Ghost' in showPlans"));
    }

    #[test]
    fn test_wrapping_preserves_span() {
        let span = Span::new(3, 1, 3, 4);
        let err: FitLangError = SemanticError::redeclaration("A", NodeKind::ClientProfile, span).into();
        assert_eq!(err.span(), Some(span));
        assert!(err.to_string().starts_with("Semantic error: Redeclaration"));
    }
}
