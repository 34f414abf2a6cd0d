//! FitLang Command Line Interface
//!
//! Usage:
//!   fitlang [OPTIONS] <input-file>
//!   fitlang --help
//!
//! Examples:
//!   fitlang plans.fl                    # Generate the call script
//!   fitlang --emit=ast plans.fl         # Just parse and dump the AST
//!   fitlang --emit=symbols plans.fl     # Show the symbol table after analysis
//!   fitlang --emit=source plans.fl      # Reformat into canonical source

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fitlang::codegen::Target;
use fitlang::utils::errors::{FitLangError, LexerError, ParseError, SemanticError};
use fitlang::utils::location::{SourceMap, Span};
use fitlang::CompileConfig;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

/// FitLang - workout plan DSL compiler
#[derive(Parser, Debug)]
#[command(name = "fitlang")]
#[command(version)]
#[command(about = "Parse, validate and generate code for FitLang programs", long_about = None)]
struct Cli {
    /// Input file (.fl format)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// What to emit
    #[arg(long, default_value = "code")]
    emit: EmitKind,

    /// Spaces per indentation level in generated code
    #[arg(long, default_value = "4")]
    indent: usize,

    /// Do not indent days and exercises under their plan
    #[arg(long)]
    flat: bool,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmitKind {
    /// Generated call script
    Code,
    /// Token stream
    Tokens,
    /// Abstract Syntax Tree (debug format)
    Ast,
    /// Abstract Syntax Tree (JSON)
    Json,
    /// Symbol table after semantic analysis
    Symbols,
    /// Canonical FitLang source
    Source,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);

    env_logger::Builder::from_default_env()
        .filter_level(config.log_level())
        .format_timestamp(None)
        .init();

    info!("FitLang v{}", fitlang::VERSION);
    debug!("Input file: {:?}", cli.input);
    debug!("Compile config: {:?}", config);

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file: {:?}", cli.input))?;

    let output = match emit(cli.emit, &source, &config) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(snippet) = error_span(&e).and_then(|span| SourceMap::new(source.as_str()).snippet(&span)) {
                eprintln!("{}", snippet);
            }
            std::process::exit(1);
        }
    };

    write_output(&cli.output, &output)
}

fn emit(kind: EmitKind, source: &str, config: &CompileConfig) -> Result<String> {
    match kind {
        EmitKind::Tokens => {
            info!("Lexing...");
            let tokens = fitlang::frontend::tokenize(source)?;
            Ok(tokens
                .iter()
                .map(|t| format!("{}\t{:?}\t{}", t.span, t.kind, t.text))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        EmitKind::Ast => {
            info!("Parsing...");
            let program = fitlang::parse(source).context("Failed to parse input")?;
            Ok(format!("{:#?}", program))
        }
        EmitKind::Json => {
            info!("Parsing...");
            let program = fitlang::parse(source).context("Failed to parse input")?;
            Ok(serde_json::to_string_pretty(&program)?)
        }
        EmitKind::Symbols => {
            info!("Analyzing...");
            let analyzed = fitlang::frontend::check(source)?;
            Ok(analyzed.symbols().to_string())
        }
        EmitKind::Code | EmitKind::Source => {
            info!("Compiling...");
            let config = CompileConfig {
                target: if matches!(kind, EmitKind::Source) { Target::Source } else { Target::Calls },
                ..config.clone()
            };
            let code = fitlang::compile(source, &config)?;
            info!("Compilation complete");
            Ok(code)
        }
    }
}

fn build_config(cli: &Cli) -> CompileConfig {
    CompileConfig {
        indent_width: cli.indent,
        indent_plans: !cli.flat,
        verbosity: if cli.quiet { 0 } else { cli.verbose.saturating_add(1) },
        ..CompileConfig::default()
    }
}

/// Span of the phase error behind `err`, if any.
fn error_span(err: &anyhow::Error) -> Option<Span> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<FitLangError>() {
            e.span()
        } else if let Some(e) = cause.downcast_ref::<LexerError>() {
            Some(e.span)
        } else if let Some(e) = cause.downcast_ref::<ParseError>() {
            Some(e.span)
        } else {
            cause.downcast_ref::<SemanticError>().map(|e| e.span)
        }
    })
}

fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content)
                .with_context(|| format!("Failed to write output file: {:?}", p))?;
        }
        None => {
            print!("{}", content);
            if !content.is_empty() && !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
