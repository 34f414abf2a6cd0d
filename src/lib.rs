//! # FitLang - a small DSL for clients, workout plans and assignments
//!
//! The crate turns FitLang source into a validated AST and generates a call
//! script from it:
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Semantic Analyzer → CodeGen → Output
//! ```
//!
//! Both the parser and the analyzer are fail-fast: the first error aborts
//! the phase and no partial result is handed on.
//!
//! ## Example
//!
//! ```rust
//! let source = r#"
//!     ClientProfile Daniel;
//!     assign legs to Daniel {
//!         Monday { exercise: "squats" | sets: 3 | rest: 1; }
//!     };
//!     showPlans(Daniel);
//! "#;
//!
//! let code = fitlang::compile(source, &fitlang::CompileConfig::default()).unwrap();
//! assert!(code.contains("AddExercise('squats', 3, 1);"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codegen;
pub mod frontend;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::codegen::{CodegenOptions, Target};
    pub use crate::frontend::ast::*;
    pub use crate::frontend::{
        analyze, validate, AnalyzedProgram, Lexer, Parser, SemanticAnalyzer, Symbol, SymbolKind,
        SymbolTable, Token, TokenCursor, TokenKind,
    };
    pub use crate::utils::errors::*;
    pub use crate::utils::pretty::PrettyPrint;
    pub use crate::CompileConfig;
}

use anyhow::Result;

/// Main entry point for parsing source code.
pub fn parse(source: &str) -> Result<frontend::ast::Program> {
    frontend::parse(source)
}

/// Parse and validate source code.
pub fn parse_and_analyze(source: &str) -> Result<frontend::AnalyzedProgram> {
    frontend::parse_and_analyze(source)
}

/// Configuration for the compilation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileConfig {
    /// What to generate
    pub target: codegen::Target,
    /// Spaces per indentation level in generated code
    pub indent_width: usize,
    /// Indent days and exercises under their plan
    pub indent_plans: bool,
    /// Verbosity level: 0 errors only, 1 warnings, 2 info, 3 debug, 4+ trace
    pub verbosity: u8,
}

impl CompileConfig {
    /// Code generation options derived from this configuration.
    pub fn codegen_options(&self) -> codegen::CodegenOptions {
        codegen::CodegenOptions {
            indent_width: self.indent_width,
            indent_plans: self.indent_plans,
        }
    }

    /// Log level implied by `verbosity`.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        let codegen = codegen::CodegenOptions::default();
        Self {
            target: codegen::Target::Calls,
            indent_width: codegen.indent_width,
            indent_plans: codegen.indent_plans,
            verbosity: 1,
        }
    }
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the full pipeline: parse, analyze and generate code.
pub fn compile(source: &str, config: &CompileConfig) -> Result<String> {
    let analyzed = parse_and_analyze(source)?;
    log::debug!(
        "validated {} statements, {} symbols",
        analyzed.program().statements.len(),
        analyzed.symbols().len()
    );
    Ok(codegen::generate(&analyzed, config.target, &config.codegen_options()))
}
