//! Semantic analysis for FitLang.
//!
//! A single pre-order walk over the program: each node is checked against
//! the symbol table as it stands, then registers what it declares, then its
//! children are visited. The first failing check aborts the walk.
//!
//! | Node          | Check                               | Registers |
//! |---------------|-------------------------------------|-----------|
//! | ClientProfile | name is new                         | `Client`  |
//! | Assignment    | client resolves to a `Client`; plan name is new | `Plan` |
//! | Day           | none (weekdays recur across plans)  | nothing   |
//! | Exercise      | `sets > 0` and `rest > 0`           | nothing   |
//! | ShowPlans     | client resolves to a `Client`       | nothing   |

use crate::frontend::ast::*;
use crate::frontend::symbols::{SymbolKind, SymbolTable};
use crate::utils::errors::SemanticError;
use crate::utils::location::Span;

type SemanticResult<T> = Result<T, SemanticError>;

/// Analyze a program with a fresh symbol table and return the populated table.
///
/// The program is only read, so analyzing it again gives the same result.
pub fn analyze(program: &Program) -> SemanticResult<SymbolTable> {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze_program(program)?;
    Ok(analyzer.into_table())
}

/// Analyze a program and, on success, seal it as an [`AnalyzedProgram`].
pub fn validate(program: Program) -> SemanticResult<AnalyzedProgram> {
    let symbols = analyze(&program)?;
    Ok(AnalyzedProgram { program, symbols })
}

/// A program that has passed semantic analysis.
///
/// Only [`validate`] can build one, so consumers such as code generation can
/// rely on every exercise being positive, every client reference resolving
/// and every plan name being unique without checking again.
#[derive(Debug, Clone)]
pub struct AnalyzedProgram {
    program: Program,
    symbols: SymbolTable,
}

impl AnalyzedProgram {
    /// The validated program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// The symbol table produced by the analysis.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Take the program and table apart.
    pub fn into_parts(self) -> (Program, SymbolTable) {
        (self.program, self.symbols)
    }
}

/// Semantic analyzer.
#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    symbols: SymbolTable,
}

impl SemanticAnalyzer {
    /// Start with an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from an existing table, e.g. across REPL inputs.
    ///
    /// Symbols registered before a failing node stay in the table.
    pub fn with_table(symbols: SymbolTable) -> Self {
        Self { symbols }
    }

    /// Symbols registered so far.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Consume the analyzer, keeping its table.
    pub fn into_table(self) -> SymbolTable {
        self.symbols
    }

    /// Check every statement in order, stopping at the first error.
    pub fn analyze_program(&mut self, program: &Program) -> SemanticResult<()> {
        for statement in &program.statements {
            self.analyze_statement(statement)?;
        }
        log::debug!("analysis registered {} symbols", self.symbols.len());
        Ok(())
    }

    fn analyze_statement(&mut self, statement: &Statement) -> SemanticResult<()> {
        match statement {
            Statement::ClientProfile(client) => self.analyze_client_profile(client),
            Statement::Assignment(assignment) => self.analyze_assignment(assignment),
            Statement::ShowPlans(show) => self.analyze_show_plans(show),
        }
    }

    fn analyze_client_profile(&mut self, client: &ClientProfile) -> SemanticResult<()> {
        self.declare(&client.name, SymbolKind::Client, NodeKind::ClientProfile, client.span)
    }

    fn analyze_assignment(&mut self, assignment: &Assignment) -> SemanticResult<()> {
        self.resolve_client(&assignment.client.name, NodeKind::Assignment, assignment.client.span)?;
        self.analyze_plan(&assignment.plan)
    }

    fn analyze_plan(&mut self, plan: &Plan) -> SemanticResult<()> {
        self.declare(&plan.name, SymbolKind::Plan, NodeKind::Plan, plan.span)?;
        for day in &plan.days {
            self.analyze_day(day)?;
        }
        Ok(())
    }

    fn analyze_day(&mut self, day: &Day) -> SemanticResult<()> {
        for exercise in &day.exercises {
            self.analyze_exercise(exercise)?;
        }
        Ok(())
    }

    fn analyze_exercise(&mut self, exercise: &Exercise) -> SemanticResult<()> {
        if !exercise.is_well_formed() {
            return Err(SemanticError::invalid_exercise(
                &exercise.name,
                exercise.sets,
                exercise.rest,
                exercise.span,
            ));
        }
        Ok(())
    }

    fn analyze_show_plans(&mut self, show: &ShowPlans) -> SemanticResult<()> {
        self.resolve_client(&show.client_name, NodeKind::ShowPlans, show.span)
    }

    fn resolve_client(&self, name: &str, node: NodeKind, span: Span) -> SemanticResult<()> {
        match self.symbols.lookup(name) {
            Some(symbol) if symbol.kind == SymbolKind::Client => Ok(()),
            _ => Err(SemanticError::undefined(name, node, span)),
        }
    }

    fn declare(&mut self, name: &str, kind: SymbolKind, node: NodeKind, span: Span) -> SemanticResult<()> {
        if !self.symbols.insert(name, kind, None) {
            return Err(SemanticError::redeclaration(name, node, span));
        }
        log::debug!("registered {} '{}'", kind, name);
        Ok(())
    }
}
