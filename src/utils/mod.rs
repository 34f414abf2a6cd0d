//! Utility modules shared by the frontend and code generation:
//! error types, source locations and pretty printing.

pub mod errors;
pub mod location;
pub mod pretty;

// Re-exports
pub use errors::*;
pub use location::{SourceLocation, SourceMap, Span};
pub use pretty::{CodeFormatter, PrettyPrint};
