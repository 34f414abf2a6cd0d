//! Code generation from a validated program.
//!
//! Generators only accept an [`AnalyzedProgram`], so an AST that skipped
//! semantic analysis cannot reach them.

pub mod calls;

pub use calls::CallCodeGen;

use crate::frontend::semantic::AnalyzedProgram;
use crate::utils::pretty::PrettyPrint;

/// Output produced by code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Template call script (`CreateClientProfile('X');` ...)
    Calls,
    /// Canonical FitLang source
    Source,
}

/// Layout options for generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Spaces per indentation level
    pub indent_width: usize,
    /// Indent days and exercises under their plan
    pub indent_plans: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            indent_plans: true,
        }
    }
}

/// Generate code for a target.
pub fn generate(analyzed: &AnalyzedProgram, target: Target, options: &CodegenOptions) -> String {
    match target {
        Target::Calls => CallCodeGen::new(options.clone()).generate(analyzed),
        Target::Source => analyzed.program().pretty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parse_and_analyze;

    #[test]
    fn test_targets() {
        let analyzed = parse_and_analyze("ClientProfile A; showPlans(A);").unwrap();
        let options = CodegenOptions::default();
        assert_eq!(
            generate(&analyzed, Target::Calls, &options),
            "CreateClientProfile('A');\nShowPlans('A');\n"
        );
        assert_eq!(
            generate(&analyzed, Target::Source, &options),
            "ClientProfile A;\nshowPlans(A);\n"
        );
    }
}
