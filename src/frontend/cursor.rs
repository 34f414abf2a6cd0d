//! Forward-only token cursor with one token of lookahead.

use crate::frontend::token::Token;

/// Cursor over a materialized token stream.
///
/// The stream always ends with an end-of-input token; one is appended if the
/// producer left it off. Reading past the end keeps yielding that marker, so
/// the parser never has to special-case exhaustion.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    /// Wrap a token stream.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().map(Token::is_end).unwrap_or(false) {
            tokens.push(Token::end_of_input());
        }
        Self { tokens, position: 0 }
    }

    /// The current token, not yet consumed.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// The most recently consumed token, or the current one at the start.
    pub fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    /// Consume the current token and return it. At the end marker this is a
    /// no-op that returns the marker.
    pub fn advance(&mut self) -> &Token {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
            &self.tokens[self.position - 1]
        } else {
            &self.tokens[self.position]
        }
    }

    /// Check if the current token is the end marker.
    pub fn is_at_end(&self) -> bool {
        self.peek().is_end()
    }

    /// Number of tokens consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::token::TokenKind;

    #[test]
    fn test_empty_stream_is_at_end() {
        let cursor = TokenCursor::new(Vec::new());
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_appends_missing_end_marker() {
        let mut cursor = TokenCursor::new(vec![Token::synthetic(TokenKind::Semicolon, ";")]);
        assert_eq!(cursor.advance().kind, TokenKind::Semicolon);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_advance_past_end_is_stable() {
        let mut cursor = TokenCursor::new(vec![
            Token::synthetic(TokenKind::Identifier, "a"),
            Token::end_of_input(),
        ]);
        assert_eq!(cursor.advance().text, "a");
        assert!(cursor.advance().is_end());
        assert!(cursor.advance().is_end());
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 1);
    }
}
