//! Flat symbol table used by semantic analysis.
//!
//! Clients, plans and every other named entity share one namespace. The
//! table is append-only: a name, once registered, is never replaced or
//! removed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a registered name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    /// Declared with `ClientProfile`
    Client,
    /// Named in an `assign` statement
    Plan,
    /// Training day
    Day,
    /// Exercise entry
    Exercise,
    /// Plan-to-client assignment
    Assignment,
    /// `showPlans` request
    ShowPlan,
    /// Integer constant
    Integer,
    /// Plain identifier
    Identifier,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolKind::Client => "client",
            SymbolKind::Plan => "plan",
            SymbolKind::Day => "day",
            SymbolKind::Exercise => "exercise",
            SymbolKind::Assignment => "assignment",
            SymbolKind::ShowPlan => "showPlan",
            SymbolKind::Integer => "integer",
            SymbolKind::Identifier => "identifier",
        };
        f.write_str(name)
    }
}

/// A registered name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Registered name
    pub name: String,
    /// What the name refers to
    pub kind: SymbolKind,
    /// Attached integer, for symbols that carry one
    pub value: Option<i64>,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.kind)?;
        if let Some(value) = self.value {
            write!(f, " = {}", value)?;
        }
        Ok(())
    }
}

/// Name-to-symbol mapping that remembers registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`. Returns `false`, leaving the table unchanged, if the
    /// name is already present.
    pub fn insert(&mut self, name: &str, kind: SymbolKind, value: Option<i64>) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }
        self.symbols.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                kind,
                value,
            },
        );
        true
    }

    /// Look up a name.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Check whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Symbols in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// Symbols of one kind, in registration order.
    pub fn of_kind(&self, kind: SymbolKind) -> impl Iterator<Item = &Symbol> {
        self.iter().filter(move |s| s.kind == kind)
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.iter() {
            writeln!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
