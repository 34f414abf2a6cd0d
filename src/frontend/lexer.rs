//! Lexer for FitLang.
//!
//! The lexer converts source text into a fully materialized token stream
//! that ends with exactly one [`TokenKind::EndOfInput`] token.

use crate::frontend::token::{Token, TokenKind};
use crate::utils::errors::{LexerError, LexerErrorKind};
use crate::utils::location::{SourceLocation, Span};
use std::iter::Peekable;
use std::str::Chars;
use unicode_xid::UnicodeXID;

/// A lexer for tokenizing source code.
pub struct Lexer<'a> {
    /// The source text
    source: &'a str,
    /// Character iterator
    chars: Peekable<Chars<'a>>,
    /// Current byte offset
    offset: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Start of current token
    token_start: SourceLocation,
    /// Whether the end marker has been produced
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            token_start: SourceLocation::start(),
            at_eof: false,
        }
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.offset)
    }

    fn mark_token_start(&mut self) {
        self.token_start = self.current_location();
    }

    fn make_span(&self) -> Span {
        Span::from_locations(self.token_start, self.current_location())
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Peek one character past the current one.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.offset..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Skip whitespace and comments.
    fn skip_whitespace(&mut self) -> Result<(), LexerError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_next() == Some('/') {
                        while self.peek().is_some() && self.peek() != Some('\n') {
                            self.advance();
                        }
                    } else if self.peek_next() == Some('*') {
                        self.mark_token_start();
                        self.advance();
                        self.advance();
                        let mut depth = 1;
                        while depth > 0 {
                            match self.advance() {
                                Some('*') if self.peek() == Some('/') => {
                                    self.advance();
                                    depth -= 1;
                                }
                                Some('/') if self.peek() == Some('*') => {
                                    self.advance();
                                    depth += 1;
                                }
                                None => {
                                    return Err(self.make_error(
                                        "Unterminated block comment".to_string(),
                                        LexerErrorKind::UnterminatedComment,
                                    ));
                                }
                                _ => {}
                            }
                        }
                    } else {
                        return Ok(());
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Token whose text is the raw lexeme.
    fn make_token(&self, kind: TokenKind) -> Token {
        let span = self.make_span();
        Token::new(kind, &self.source[span.start_offset..span.end_offset], span)
    }

    fn make_error(&self, message: String, kind: LexerErrorKind) -> LexerError {
        LexerError {
            message,
            span: self.make_span(),
            kind,
        }
    }

    fn scan_integer(&mut self) -> Token {
        while self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            self.advance();
        }
        self.make_token(TokenKind::IntLiteral)
    }

    /// Scan an identifier or keyword.
    fn scan_word(&mut self) -> Token {
        while self.peek().map(|c| c.is_xid_continue() || c == '_').unwrap_or(false) {
            self.advance();
        }
        let span = self.make_span();
        let lexeme = &self.source[span.start_offset..span.end_offset];
        let kind = TokenKind::keyword(lexeme).unwrap_or(TokenKind::Identifier);
        Token::new(kind, lexeme, span)
    }

    /// Scan a string literal; the opening quote is already consumed.
    fn scan_string(&mut self) -> Result<Token, LexerError> {
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('"') => value.push('"'),
                    Some('0') => value.push('\0'),
                    Some(c) => {
                        return Err(self.make_error(
                            format!("Invalid escape sequence: \\{}", c),
                            LexerErrorKind::InvalidEscape,
                        ));
                    }
                    None => {
                        return Err(self.make_error(
                            "Unterminated string literal".to_string(),
                            LexerErrorKind::UnterminatedString,
                        ));
                    }
                },
                Some('\n') => {
                    return Err(self.make_error(
                        "Unterminated string literal (newline in string)".to_string(),
                        LexerErrorKind::UnterminatedString,
                    ));
                }
                Some(c) => value.push(c),
                None => {
                    return Err(self.make_error(
                        "Unterminated string literal".to_string(),
                        LexerErrorKind::UnterminatedString,
                    ));
                }
            }
        }

        Ok(Token::new(TokenKind::StringLiteral, value, self.make_span()))
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace()?;
        self.mark_token_start();

        let c = match self.advance() {
            Some(c) => c,
            None => {
                self.at_eof = true;
                return Ok(self.make_token(TokenKind::EndOfInput));
            }
        };

        match c {
            '{' => Ok(self.make_token(TokenKind::LeftBrace)),
            '}' => Ok(self.make_token(TokenKind::RightBrace)),
            '(' => Ok(self.make_token(TokenKind::LeftParen)),
            ')' => Ok(self.make_token(TokenKind::RightParen)),
            ':' => Ok(self.make_token(TokenKind::Colon)),
            '|' => Ok(self.make_token(TokenKind::Pipe)),
            ';' => Ok(self.make_token(TokenKind::Semicolon)),
            '"' => self.scan_string(),
            c if c.is_ascii_digit() => Ok(self.scan_integer()),
            c if c.is_xid_start() || c == '_' => Ok(self.scan_word()),
            _ => Err(self.make_error(
                format!("Unexpected character: '{}'", c),
                LexerErrorKind::UnexpectedChar,
            )),
        }
    }

    /// Check if the end marker has been produced.
    pub fn is_at_end(&self) -> bool {
        self.at_eof
    }

    /// Collect all tokens, including the trailing end marker.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_end = token.is_end();
            tokens.push(token);
            if is_end {
                break;
            }
        }
        log::trace!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at_eof {
            None
        } else {
            Some(self.next_token())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().unwrap()
    }

    fn token_kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(token_kinds("   \t\n\r\n   "), vec![TokenKind::EndOfInput]);
    }

    #[test]
    fn test_client_profile() {
        let tokens = lex("ClientProfile Daniel;");
        assert_eq!(tokens[0].kind, TokenKind::ClientProfile);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "Daniel");
        assert_eq!(tokens[2].kind, TokenKind::Semicolon);
        assert_eq!(tokens[3].kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_assignment_kinds() {
        let kinds = token_kinds(r#"assign p to D { Monday { exercise: "squats" | sets: 3 | rest: 1; } };"#);
        use TokenKind::*;
        assert_eq!(
            kinds,
            vec![
                Assign, Identifier, To, Identifier, LeftBrace, DayName, LeftBrace, Exercise, Colon,
                StringLiteral, Pipe, Sets, Colon, IntLiteral, Pipe, Rest, Colon, IntLiteral,
                Semicolon, RightBrace, RightBrace, Semicolon, EndOfInput,
            ]
        );
    }

    #[test]
    fn test_show_plans() {
        let kinds = token_kinds("showPlans(Daniel);");
        assert_eq!(
            kinds,
            vec![
                TokenKind::ShowPlans,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::Semicolon,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_day_names_keep_text() {
        let tokens = lex("Monday Sunday");
        assert_eq!(tokens[0].kind, TokenKind::DayName);
        assert_eq!(tokens[0].text, "Monday");
        assert_eq!(tokens[1].text, "Sunday");
    }

    #[test]
    fn test_string_literal_is_unescaped() {
        let tokens = lex(r#""bench \"press\"""#);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, "bench \"press\"");
    }

    #[test]
    fn test_integer_literal() {
        let tokens = lex("12 0");
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[0].text, "12");
        assert_eq!(tokens[1].text, "0");
    }

    #[test]
    fn test_comments() {
        let tokens = lex("foo // comment\nbar /* block /* nested */ */ baz");
        assert_eq!(tokens[0].text, "foo");
        assert_eq!(tokens[1].text, "bar");
        assert_eq!(tokens[2].text, "baz");
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("ClientProfile A; /* never closed\nshowPlans(Ghost);")
            .tokenize()
            .unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::UnterminatedComment);
        assert_eq!(err.span.start_line, 1);
        assert_eq!(err.span.start_column, 18);

        let err = Lexer::new("/* outer /* inner */").tokenize().unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::UnterminatedComment);
    }

    #[test]
    fn test_location_tracking() {
        let tokens = lex("ClientProfile A;\nshowPlans(A);");
        assert_eq!(tokens[0].span.start_line, 1);
        assert_eq!(tokens[3].span.start_line, 2);
        assert_eq!(tokens[3].span.start_column, 1);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("exercise: \"squats").tokenize().unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::UnterminatedString);
    }

    #[test]
    fn test_invalid_escape() {
        let err = Lexer::new(r#""a\q""#).tokenize().unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::InvalidEscape);
    }

    #[test]
    fn test_unexpected_char() {
        let err = Lexer::new("ClientProfile A = 3;").tokenize().unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::UnexpectedChar);
        assert_eq!(err.span.start_column, 17);
    }
}
