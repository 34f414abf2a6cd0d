//! Pretty printing utilities.
//!
//! [`PrettyPrint`] renders the AST back into canonical FitLang source;
//! [`CodeFormatter`] is the line/indent buffer used by code generation.

use crate::frontend::ast::{Assignment, Day, Exercise, Program, Statement};
use pretty::{BoxAllocator, DocAllocator, DocBuilder};
use std::fmt;

/// Default line width for pretty printing.
pub const DEFAULT_WIDTH: usize = 80;

/// Indentation of nested blocks in canonical source.
const BLOCK_INDENT: isize = 4;

/// A pretty-printable value.
pub trait PrettyPrint {
    /// Convert to a pretty document.
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D>;

    /// Pretty print to a string with the given width.
    fn pretty_print(&self, width: usize) -> String {
        let allocator = BoxAllocator;
        let doc = self.to_doc(&allocator);
        let mut output = String::new();
        doc.render_fmt(width, &mut output).expect("render into String");
        output
    }

    /// Pretty print with default width.
    fn pretty(&self) -> String {
        self.pretty_print(DEFAULT_WIDTH)
    }
}

/// Quote a string literal the way the lexer reads it back.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Lay out `items` one per line inside `{ ... }`, or `{ }` when empty.
fn braced<'a, D: DocAllocator<'a>>(
    allocator: &'a D,
    header: String,
    items: Vec<DocBuilder<'a, D>>,
) -> DocBuilder<'a, D> {
    if items.is_empty() {
        return allocator.text(header).append(" { }");
    }
    let mut body = allocator.nil();
    for item in items {
        body = body.append(allocator.hardline()).append(item);
    }
    allocator
        .text(header)
        .append(" {")
        .append(body.nest(BLOCK_INDENT))
        .append(allocator.hardline())
        .append("}")
}

impl PrettyPrint for Program {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        let mut doc = allocator.nil();
        for statement in &self.statements {
            doc = doc.append(statement.to_doc(allocator)).append(allocator.hardline());
        }
        doc
    }
}

impl PrettyPrint for Statement {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        match self {
            Statement::ClientProfile(client) => {
                allocator.text(format!("ClientProfile {};", client.name))
            }
            Statement::Assignment(assignment) => assignment.to_doc(allocator),
            Statement::ShowPlans(show) => {
                allocator.text(format!("showPlans({});", show.client_name))
            }
        }
    }
}

impl PrettyPrint for Assignment {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        let header = format!("assign {} to {}", self.plan.name, self.client.name);
        let days = self.plan.days.iter().map(|d| d.to_doc(allocator)).collect();
        braced(allocator, header, days).append(";")
    }
}

impl PrettyPrint for Day {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        let exercises = self.exercises.iter().map(|e| e.to_doc(allocator)).collect();
        braced(allocator, self.name.to_string(), exercises)
    }
}

impl PrettyPrint for Exercise {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        allocator.text(format!(
            "exercise: {} | sets: {} | rest: {};",
            quote(&self.name),
            self.sets,
            self.rest
        ))
    }
}

/// A simple line-oriented formatter for generated code.
#[derive(Debug)]
pub struct CodeFormatter {
    output: String,
    indent_level: usize,
    indent_str: String,
    at_line_start: bool,
}

impl CodeFormatter {
    /// Create a new formatter with the given indent string.
    pub fn new(indent_str: &str) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: indent_str.to_string(),
            at_line_start: true,
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write text.
    pub fn write(&mut self, s: &str) {
        for c in s.chars() {
            if c == '\n' {
                self.output.push('\n');
                self.at_line_start = true;
            } else {
                if self.at_line_start {
                    for _ in 0..self.indent_level {
                        self.output.push_str(&self.indent_str);
                    }
                    self.at_line_start = false;
                }
                self.output.push(c);
            }
        }
    }

    /// Write a line.
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.write("\n");
    }

    /// Get the formatted output.
    pub fn finish(self) -> String {
        self.output
    }
}

impl fmt::Write for CodeFormatter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parse;

    #[test]
    fn test_code_formatter() {
        let mut fmt = CodeFormatter::new("  ");
        fmt.writeln("CreatePlan('p');");
        fmt.indent();
        fmt.writeln("AddDay('Monday');");
        fmt.dedent();
        fmt.writeln("AssignPlan('A', 'p');");

        assert_eq!(
            fmt.finish(),
            "CreatePlan('p');\n  AddDay('Monday');\nAssignPlan('A', 'p');\n"
        );
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("squats"), "\"squats\"");
        assert_eq!(quote("a \"b\" \\ c"), "\"a \\\"b\\\" \\\\ c\"");
    }

    #[test]
    fn test_canonical_layout() {
        let program = parse(
            r#"ClientProfile A; assign p to A { Monday { exercise: "squats" | rest: 1 | sets: 3 } Friday { } }; showPlans(A);"#,
        )
        .unwrap();
        let expected = "\
ClientProfile A;
assign p to A {
    Monday {
        exercise: \"squats\" | sets: 3 | rest: 1;
    }
    Friday { }
};
showPlans(A);
";
        assert_eq!(program.pretty(), expected);
    }

    #[test]
    fn test_pretty_output_reparses_to_same_ast() {
        let source = r#"
            ClientProfile Daniel;
            assign legs to Daniel {
                Monday { exercise: "front \"squat\"" | sets: 5 | rest: 2 exercise: "plank" }
                Sunday { }
            };
            showPlans(Daniel);
        "#;
        let program = parse(source).unwrap();
        let reparsed = parse(&program.pretty()).unwrap();
        assert_eq!(program.statements.len(), reparsed.statements.len());
        for (a, b) in program.statements.iter().zip(&reparsed.statements) {
            assert_eq!(a.pretty(), b.pretty());
        }
    }
}
