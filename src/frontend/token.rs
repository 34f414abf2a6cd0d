//! Token types for FitLang.
//!
//! This module defines all token types produced by the lexer and consumed
//! by the parser.

use crate::utils::location::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A token in the source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token text. For string literals this is the unescaped contents
    /// without the surrounding quotes.
    pub text: String,
    /// The source span
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Create a token with no source position, e.g. for hand-built streams.
    pub fn synthetic(kind: TokenKind, text: impl Into<String>) -> Self {
        Self::new(kind, text, Span::dummy())
    }

    /// The end-of-input marker.
    pub fn end_of_input() -> Self {
        Self::synthetic(TokenKind::EndOfInput, "")
    }

    /// Check if this is the end-of-input marker.
    pub fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfInput)
    }

    /// Check if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::StringLiteral => write!(f, "string {:?}", self.text),
            TokenKind::Identifier | TokenKind::IntLiteral | TokenKind::DayName => {
                write!(f, "{} '{}'", self.kind, self.text)
            }
            _ => write!(f, "'{}'", self.kind),
        }
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords
    /// `ClientProfile` keyword
    ClientProfile,
    /// `assign` keyword
    Assign,
    /// `to` keyword
    To,
    /// `showPlans` keyword
    ShowPlans,
    /// `exercise` keyword
    Exercise,
    /// `sets` keyword
    Sets,
    /// `rest` keyword
    Rest,
    /// One of `Monday` .. `Sunday`; the weekday is the token text
    DayName,

    // Names and literals
    /// Identifier (client or plan name)
    Identifier,
    /// String literal
    StringLiteral,
    /// Integer literal
    IntLiteral,

    // Punctuation
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `:`
    Colon,
    /// `|`
    Pipe,
    /// `;`
    Semicolon,

    /// End of input
    EndOfInput,
}

impl TokenKind {
    /// Check if this is a keyword.
    pub fn is_keyword(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            ClientProfile | Assign | To | ShowPlans | Exercise | Sets | Rest | DayName
        )
    }

    /// Check if this is punctuation.
    pub fn is_punctuation(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            LeftBrace | RightBrace | LeftParen | RightParen | Colon | Pipe | Semicolon
        )
    }

    /// Get the keyword kind for a word, if it is one.
    pub fn keyword(s: &str) -> Option<TokenKind> {
        match s {
            "ClientProfile" => Some(TokenKind::ClientProfile),
            "assign" => Some(TokenKind::Assign),
            "to" => Some(TokenKind::To),
            "showPlans" => Some(TokenKind::ShowPlans),
            "exercise" => Some(TokenKind::Exercise),
            "sets" => Some(TokenKind::Sets),
            "rest" => Some(TokenKind::Rest),
            "Monday" | "Tuesday" | "Wednesday" | "Thursday" | "Friday" | "Saturday"
            | "Sunday" => Some(TokenKind::DayName),
            _ => None,
        }
    }

    /// Get a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            ClientProfile => "ClientProfile",
            Assign => "assign",
            To => "to",
            ShowPlans => "showPlans",
            Exercise => "exercise",
            Sets => "sets",
            Rest => "rest",
            DayName => "day name",
            Identifier => "identifier",
            StringLiteral => "string literal",
            IntLiteral => "integer literal",
            LeftBrace => "{",
            RightBrace => "}",
            LeftParen => "(",
            RightParen => ")",
            Colon => ":",
            Pipe => "|",
            Semicolon => ";",
            EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("assign"), Some(TokenKind::Assign));
        assert_eq!(TokenKind::keyword("showPlans"), Some(TokenKind::ShowPlans));
        assert_eq!(TokenKind::keyword("Friday"), Some(TokenKind::DayName));
        assert_eq!(TokenKind::keyword("Daniel"), None);
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(TokenKind::keyword("Assign"), None);
        assert_eq!(TokenKind::keyword("monday"), None);
        assert_eq!(TokenKind::keyword("clientprofile"), None);
    }

    #[test]
    fn test_classification() {
        assert!(TokenKind::Sets.is_keyword());
        assert!(TokenKind::DayName.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
        assert!(TokenKind::Pipe.is_punctuation());
        assert!(!TokenKind::Rest.is_punctuation());
    }

    #[test]
    fn test_token_display() {
        let tok = Token::synthetic(TokenKind::Identifier, "Daniel");
        assert_eq!(tok.to_string(), "identifier 'Daniel'");
        assert_eq!(Token::synthetic(TokenKind::Semicolon, ";").to_string(), "';'");
        assert_eq!(Token::end_of_input().to_string(), "end of input");
    }
}
