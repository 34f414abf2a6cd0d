//! Abstract Syntax Tree (AST) for FitLang.
//!
//! Every node owns its children exclusively, so dropping a [`Program`]
//! reclaims the whole tree. Statements keep source order, which is also the
//! order the analyzer registers symbols in.

use crate::utils::location::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A complete program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level statements in source order
    pub statements: Vec<Statement>,
    /// Source span
    pub span: Span,
}

impl Program {
    /// Create a new empty program.
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
            span: Span::dummy(),
        }
    }

    /// Check if the program has no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// All client declarations.
    pub fn clients(&self) -> impl Iterator<Item = &ClientProfile> {
        self.statements.iter().filter_map(|s| match s {
            Statement::ClientProfile(c) => Some(c),
            _ => None,
        })
    }

    /// All plan assignments.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Assignment(a) => Some(a),
            _ => None,
        })
    }

    /// Plans assigned to the named client, in source order.
    pub fn plans_for<'a>(&'a self, client: &'a str) -> impl Iterator<Item = &'a Plan> + 'a {
        self.assignments()
            .filter(move |a| a.client.name == client)
            .map(|a| &a.plan)
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// `ClientProfile Name;`
    ClientProfile(ClientProfile),
    /// `assign Plan to Client { Day+ };`
    Assignment(Assignment),
    /// `showPlans(Client);`
    ShowPlans(ShowPlans),
}

impl Statement {
    /// The kind of node this statement is.
    pub fn node_kind(&self) -> NodeKind {
        match self {
            Statement::ClientProfile(_) => NodeKind::ClientProfile,
            Statement::Assignment(_) => NodeKind::Assignment,
            Statement::ShowPlans(_) => NodeKind::ShowPlans,
        }
    }

    /// Source span of the statement.
    pub fn span(&self) -> Span {
        match self {
            Statement::ClientProfile(c) => c.span,
            Statement::Assignment(a) => a.span,
            Statement::ShowPlans(s) => s.span,
        }
    }
}

/// A client declaration, also used as the client reference of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Client name
    pub name: String,
    /// Source span
    pub span: Span,
}

/// A named workout plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan name
    pub name: String,
    /// Training days in source order
    pub days: Vec<Day>,
    /// Source span
    pub span: Span,
}

impl Plan {
    /// Total number of exercises across all days.
    pub fn exercise_count(&self) -> usize {
        self.days.iter().map(|d| d.exercises.len()).sum()
    }
}

/// A training day inside a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Which weekday
    pub name: Weekday,
    /// Exercises in source order (may be empty)
    pub exercises: Vec<Exercise>,
    /// Source span
    pub span: Span,
}

/// A single exercise.
///
/// `sets` and `rest` are zero when omitted in the source; the analyzer, not
/// the parser, rejects non-positive values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name (the string literal contents)
    pub name: String,
    /// Number of sets
    pub sets: i64,
    /// Rest time
    pub rest: i64,
    /// Source span
    pub span: Span,
}

impl Exercise {
    /// Check the positivity invariant the analyzer enforces.
    pub fn is_well_formed(&self) -> bool {
        self.sets > 0 && self.rest > 0
    }
}

/// Assignment of a plan to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The client receiving the plan (a reference, resolved by the analyzer)
    pub client: ClientProfile,
    /// The plan being defined and assigned
    pub plan: Plan,
    /// Source span
    pub span: Span,
}

/// `showPlans(Client);`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowPlans {
    /// Name of the client whose plans to show
    pub client_name: String,
    /// Source span
    pub span: Span,
}

/// A bare name read by the parser before it is folded into its owning node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// The name
    pub name: String,
    /// Source span
    pub span: Span,
}

/// Day of the week a training day is scheduled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    /// `Monday`
    Monday,
    /// `Tuesday`
    Tuesday,
    /// `Wednesday`
    Wednesday,
    /// `Thursday`
    Thursday,
    /// `Friday`
    Friday,
    /// `Saturday`
    Saturday,
    /// `Sunday`
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The source spelling of this weekday.
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl FromStr for Weekday {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL.iter().copied().find(|d| d.name() == s).ok_or(())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Node kinds, used to give diagnostics their context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Whole program
    Program,
    /// `ClientProfile` declaration
    ClientProfile,
    /// Plan body of an assignment
    Plan,
    /// Day block
    Day,
    /// Exercise entry
    Exercise,
    /// `assign ... to ...` statement
    Assignment,
    /// `showPlans(...)` statement
    ShowPlans,
    /// Identifier reference
    Identifier,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Program => "program",
            NodeKind::ClientProfile => "client profile",
            NodeKind::Plan => "plan",
            NodeKind::Day => "day",
            NodeKind::Exercise => "exercise",
            NodeKind::Assignment => "assignment",
            NodeKind::ShowPlans => "showPlans",
            NodeKind::Identifier => "identifier",
        };
        f.write_str(name)
    }
}
