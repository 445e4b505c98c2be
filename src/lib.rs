//! C-- name resolution
//!
//! Scoped symbol table and the static pass that binds every identifier in a
//! parsed C-- program to its declaration, recording the type information
//! later passes need.

pub mod frontend;
pub mod types;
pub mod utils;
pub mod feedback;

pub use frontend::ast::Program;
pub use frontend::reporter::{Diagnostic, Diagnostics, ErrorReporter, StderrReporter};
pub use frontend::resolver::{resolve, Resolution, Resolver};
pub use frontend::scope::SymbolTable;
pub use frontend::symbols::{Symbol, SymbolId, SymbolStore};
pub use types::Type;
pub use utils::{Error, Position, Result};
