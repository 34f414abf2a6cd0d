//! Frontend: lexer, parser, AST, symbol table and semantic analysis.
//!
//! ## Language Overview
//!
//! ```text
//! ClientProfile Daniel;
//!
//! assign legs to Daniel {
//!     Monday {
//!         exercise: "squats" | sets: 3 | rest: 1;
//!         exercise: "lunges" | rest: 1 | sets: 4;
//!     }
//!     Thursday { }
//! };
//!
//! showPlans(Daniel);
//! ```

pub mod token;
pub mod lexer;
pub mod cursor;
pub mod ast;
pub mod parser;
pub mod symbols;
pub mod semantic;

// Re-exports
pub use ast::*;
pub use cursor::TokenCursor;
pub use lexer::Lexer;
pub use parser::Parser;
pub use semantic::{analyze, validate, AnalyzedProgram, SemanticAnalyzer};
pub use symbols::{Symbol, SymbolKind, SymbolTable};
pub use token::{Token, TokenKind};
pub use crate::utils::errors::{ParseError, SemanticError};

use crate::utils::errors::FitResult;
use anyhow::Result;

/// Lex source text into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Ok(Lexer::new(source).tokenize()?)
}

/// Parse source code into an AST.
pub fn parse(source: &str) -> Result<Program> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);
    Ok(parser.parse_program()?)
}

/// Parse and perform semantic analysis.
pub fn parse_and_analyze(source: &str) -> Result<AnalyzedProgram> {
    let program = parse(source)?;
    Ok(semantic::validate(program)?)
}

/// Lex, parse and analyze, keeping the phase error typed.
pub fn check(source: &str) -> FitResult<AnalyzedProgram> {
    let tokens = Lexer::new(source).tokenize()?;
    let program = Parser::new(tokens).parse_program()?;
    Ok(semantic::validate(program)?)
}
