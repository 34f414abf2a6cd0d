//! Parser for FitLang.
//!
//! This module implements a recursive descent parser that converts a token
//! stream into an AST. The grammar is LL(1):
//!
//! ```text
//! Program    := Statement* EndOfInput
//! Statement  := ClientDecl | Assignment | ShowPlans
//! ClientDecl := "ClientProfile" Identifier ";"
//! Assignment := "assign" Identifier "to" Identifier "{" Day+ "}" ";"
//! Day        := DayName "{" Exercise* "}"
//! Exercise   := "exercise" ":" StringLiteral ("|" "sets" ":" IntLiteral)?
//!               ("|" "rest" ":" IntLiteral)? ";"?
//! ShowPlans  := "showPlans" "(" Identifier ")" ";"
//! ```
//!
//! `sets` and `rest` may come in either order but at most once each. Names
//! are not resolved here; that is the analyzer's job.

use crate::frontend::ast::*;
use crate::frontend::cursor::TokenCursor;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::errors::ParseError;
use crate::utils::location::Span;

type ParseResult<T> = Result<T, ParseError>;

/// A parser for FitLang.
pub struct Parser {
    cursor: TokenCursor,
}

impl Parser {
    /// Create a parser over a token stream.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::from_cursor(TokenCursor::new(tokens))
    }

    /// Create a parser over an existing cursor.
    pub fn from_cursor(cursor: TokenCursor) -> Self {
        Self { cursor }
    }

    /// Parse a complete program.
    ///
    /// The first syntax error aborts the parse; no partial program is
    /// returned.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let start = self.current().span;
        let mut program = Program::new();

        while !self.is_at_end() {
            program.statements.push(self.parse_statement()?);
        }

        program.span = start.merge(&self.cursor.previous().span);
        log::debug!("parsed {} statements", program.statements.len());
        Ok(program)
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        log::trace!("statement at {}", self.current().span);
        match self.current().kind {
            TokenKind::ClientProfile => Ok(Statement::ClientProfile(self.parse_client_decl()?)),
            TokenKind::Assign => Ok(Statement::Assignment(self.parse_assignment()?)),
            TokenKind::ShowPlans => Ok(Statement::ShowPlans(self.parse_show_plans()?)),
            _ => Err(ParseError::unexpected(
                "statement",
                &[
                    TokenKind::ClientProfile,
                    TokenKind::Assign,
                    TokenKind::ShowPlans,
                    TokenKind::EndOfInput,
                ],
                self.current(),
            )),
        }
    }

    fn parse_client_decl(&mut self) -> ParseResult<ClientProfile> {
        const PRODUCTION: &str = "client declaration";
        let start = self.consume(TokenKind::ClientProfile, PRODUCTION)?.span;
        let name = self.consume_identifier(PRODUCTION)?;
        self.consume(TokenKind::Semicolon, PRODUCTION)?;

        Ok(ClientProfile {
            name: name.name,
            span: start.merge(&self.previous_span()),
        })
    }

    fn parse_assignment(&mut self) -> ParseResult<Assignment> {
        const PRODUCTION: &str = "assignment";
        let start = self.consume(TokenKind::Assign, PRODUCTION)?.span;
        let plan_name = self.consume_identifier(PRODUCTION)?;
        self.consume(TokenKind::To, PRODUCTION)?;
        let client = self.consume_identifier(PRODUCTION)?;
        self.consume(TokenKind::LeftBrace, PRODUCTION)?;

        let mut days = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::DayName => days.push(self.parse_day()?),
                TokenKind::RightBrace if !days.is_empty() => break,
                TokenKind::EndOfInput => {
                    return Err(ParseError::unterminated("plan", self.current()));
                }
                _ => {
                    let expected: &[TokenKind] = if days.is_empty() {
                        &[TokenKind::DayName]
                    } else {
                        &[TokenKind::DayName, TokenKind::RightBrace]
                    };
                    return Err(ParseError::unexpected("plan", expected, self.current()));
                }
            }
        }
        self.advance();

        let plan = Plan {
            name: plan_name.name,
            days,
            span: plan_name.span.merge(&self.previous_span()),
        };
        self.consume(TokenKind::Semicolon, PRODUCTION)?;

        Ok(Assignment {
            client: ClientProfile {
                name: client.name,
                span: client.span,
            },
            plan,
            span: start.merge(&self.previous_span()),
        })
    }

    fn parse_day(&mut self) -> ParseResult<Day> {
        const PRODUCTION: &str = "day";
        let day_token = self.consume(TokenKind::DayName, PRODUCTION)?;
        let name: Weekday = day_token
            .text
            .parse()
            .map_err(|_| ParseError::unexpected(PRODUCTION, &[TokenKind::DayName], &day_token))?;
        log::trace!("day {} at {}", name, day_token.span);
        self.consume(TokenKind::LeftBrace, PRODUCTION)?;

        let mut exercises = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::Exercise => exercises.push(self.parse_exercise()?),
                TokenKind::RightBrace => {
                    self.advance();
                    break;
                }
                TokenKind::EndOfInput => {
                    return Err(ParseError::unterminated(PRODUCTION, self.current()));
                }
                _ => {
                    return Err(ParseError::unexpected(
                        PRODUCTION,
                        &[TokenKind::Exercise, TokenKind::RightBrace],
                        self.current(),
                    ));
                }
            }
        }

        Ok(Day {
            name,
            exercises,
            span: day_token.span.merge(&self.previous_span()),
        })
    }

    fn parse_exercise(&mut self) -> ParseResult<Exercise> {
        const PRODUCTION: &str = "exercise";
        let start = self.consume(TokenKind::Exercise, PRODUCTION)?.span;
        self.consume(TokenKind::Colon, PRODUCTION)?;
        let name = self.consume(TokenKind::StringLiteral, PRODUCTION)?.text;

        let mut sets = None;
        let mut rest = None;
        while self.match_token(TokenKind::Pipe) {
            let attribute = self.current().clone();
            let slot = match attribute.kind {
                TokenKind::Sets => &mut sets,
                TokenKind::Rest => &mut rest,
                _ => {
                    return Err(ParseError::unexpected(
                        "exercise attribute",
                        &[TokenKind::Sets, TokenKind::Rest],
                        &attribute,
                    ));
                }
            };
            if slot.is_some() {
                return Err(ParseError::duplicate_attribute(&attribute));
            }
            self.advance();
            self.consume(TokenKind::Colon, "exercise attribute")?;
            *slot = Some(self.parse_int("exercise attribute")?);
        }
        self.match_token(TokenKind::Semicolon);

        log::trace!("exercise {:?} sets={:?} rest={:?}", name, sets, rest);
        Ok(Exercise {
            name,
            sets: sets.unwrap_or(0),
            rest: rest.unwrap_or(0),
            span: start.merge(&self.previous_span()),
        })
    }

    fn parse_show_plans(&mut self) -> ParseResult<ShowPlans> {
        const PRODUCTION: &str = "showPlans";
        let start = self.consume(TokenKind::ShowPlans, PRODUCTION)?.span;
        self.consume(TokenKind::LeftParen, PRODUCTION)?;
        let client = self.consume_identifier(PRODUCTION)?;
        self.consume(TokenKind::RightParen, PRODUCTION)?;
        self.consume(TokenKind::Semicolon, PRODUCTION)?;

        Ok(ShowPlans {
            client_name: client.name,
            span: start.merge(&self.previous_span()),
        })
    }

    fn parse_int(&mut self, production: &'static str) -> ParseResult<i64> {
        let token = self.consume(TokenKind::IntLiteral, production)?;
        token
            .text
            .parse()
            .map_err(|_| ParseError::unexpected(production, &[TokenKind::IntLiteral], &token))
    }

    // Helper methods
    fn current(&self) -> &Token {
        self.cursor.peek()
    }

    fn previous_span(&self) -> Span {
        self.cursor.previous().span
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    fn advance(&mut self) -> Token {
        self.cursor.advance().clone()
    }

    fn consume(&mut self, kind: TokenKind, production: &'static str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(production, &[kind], self.current()))
        }
    }

    fn consume_identifier(&mut self, production: &'static str) -> ParseResult<Identifier> {
        let token = self.consume(TokenKind::Identifier, production)?;
        Ok(Identifier {
            name: token.text,
            span: token.span,
        })
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }
}
