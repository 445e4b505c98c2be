//! Frontend module - AST, symbol table, name resolution

pub mod ast;
pub mod symbols;
pub mod scope;
pub mod reporter;
pub mod resolver;
