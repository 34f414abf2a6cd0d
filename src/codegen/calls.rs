//! Call-script generation.
//!
//! Each AST node maps to one template call:
//!
//! ```text
//! ClientProfile X;         CreateClientProfile('X');
//! assign P to C { ... };   CreatePlan('P');
//!   Monday { ... }           AddDay('Monday');
//!     exercise             AddExercise('name', sets, rest);
//!                          AssignPlan('C', 'P');
//! showPlans(C);            ShowPlans('C');
//! ```

use crate::codegen::CodegenOptions;
use crate::frontend::ast::{Assignment, Day, Exercise, Statement};
use crate::frontend::semantic::AnalyzedProgram;
use crate::utils::pretty::CodeFormatter;

/// Emits one call per line for a validated program.
pub struct CallCodeGen {
    options: CodegenOptions,
}

impl CallCodeGen {
    /// Create a generator with the given layout options.
    pub fn new(options: CodegenOptions) -> Self {
        Self { options }
    }

    /// Generate the call script.
    pub fn generate(&self, analyzed: &AnalyzedProgram) -> String {
        let mut f = CodeFormatter::new(&" ".repeat(self.options.indent_width));
        for statement in &analyzed.program().statements {
            self.generate_statement(&mut f, statement);
        }
        f.finish()
    }

    fn generate_statement(&self, f: &mut CodeFormatter, statement: &Statement) {
        match statement {
            Statement::ClientProfile(client) => {
                f.writeln(&format!("CreateClientProfile({});", quote(&client.name)));
            }
            Statement::Assignment(assignment) => self.generate_assignment(f, assignment),
            Statement::ShowPlans(show) => {
                f.writeln(&format!("ShowPlans({});", quote(&show.client_name)));
            }
        }
    }

    fn generate_assignment(&self, f: &mut CodeFormatter, assignment: &Assignment) {
        let plan = &assignment.plan;
        f.writeln(&format!("CreatePlan({});", quote(&plan.name)));
        self.nested(f, |gen, f| {
            for day in &plan.days {
                gen.generate_day(f, day);
            }
        });
        f.writeln(&format!(
            "AssignPlan({}, {});",
            quote(&assignment.client.name),
            quote(&plan.name)
        ));
    }

    fn generate_day(&self, f: &mut CodeFormatter, day: &Day) {
        f.writeln(&format!("AddDay({});", quote(day.name.name())));
        self.nested(f, |gen, f| {
            for exercise in &day.exercises {
                gen.generate_exercise(f, exercise);
            }
        });
    }

    fn generate_exercise(&self, f: &mut CodeFormatter, exercise: &Exercise) {
        f.writeln(&format!(
            "AddExercise({}, {}, {});",
            quote(&exercise.name),
            exercise.sets,
            exercise.rest
        ));
    }

    fn nested<F: FnOnce(&Self, &mut CodeFormatter)>(&self, f: &mut CodeFormatter, body: F) {
        if self.options.indent_plans {
            f.indent();
            body(self, f);
            f.dedent();
        } else {
            body(self, f);
        }
    }
}

/// Single-quote a name, escaping `'` and `\`.
fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('\'');
    for c in name.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parse_and_analyze;

    fn generate(source: &str, options: CodegenOptions) -> String {
        let analyzed = parse_and_analyze(source).unwrap();
        CallCodeGen::new(options).generate(&analyzed)
    }

    #[test]
    fn test_client_and_show() {
        let code = generate("ClientProfile Daniel; showPlans(Daniel);", CodegenOptions::default());
        assert_eq!(code, "CreateClientProfile('Daniel');\nShowPlans('Daniel');\n");
    }

    #[test]
    fn test_assignment_indented() {
        let source = r#"
            ClientProfile D;
            assign legs to D { Monday { exercise: "squats" | sets: 3 | rest: 1 } Friday { } };
        "#;
        let code = generate(source, CodegenOptions::default());
        let expected = "\
CreateClientProfile('D');
CreatePlan('legs');
    AddDay('Monday');
        AddExercise('squats', 3, 1);
    AddDay('Friday');
AssignPlan('D', 'legs');
";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_flat_layout() {
        let source = r#"ClientProfile D; assign p to D { Monday { exercise: "row" | sets: 2 | rest: 4 } };"#;
        let options = CodegenOptions {
            indent_plans: false,
            ..CodegenOptions::default()
        };
        let code = generate(source, options);
        assert!(code.lines().all(|line| !line.starts_with(' ')));
        assert!(code.contains("AddExercise('row', 2, 4);"));
    }

    #[test]
    fn test_quote_escapes_single_quotes() {
        assert_eq!(quote("farmer's walk"), "'farmer\\'s walk'");
        assert_eq!(quote("a\\b"), "'a\\\\b'");
    }
}
