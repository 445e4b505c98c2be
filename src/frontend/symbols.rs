//! Symbols and the arena that owns them
//!
//! Every declaration produces exactly one `Symbol`. Scopes and struct field
//! namespaces bind names to `SymbolId`s, and resolved identifier nodes carry
//! the same id, so later passes read and annotate the one shared record.

use std::fmt;

use crate::frontend::scope::SymbolTable;
use crate::types::{StructId, Type};
use crate::utils::{Error, Result};

/// Handle to a symbol held by a `SymbolStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(usize);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Symbol information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    ty: Type,
    offset: Option<i32>,
    is_global: bool,
}

impl Symbol {
    pub fn new(ty: Type, is_global: bool) -> Self {
        Self {
            ty,
            offset: None,
            is_global,
        }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Storage offset, once the offset-assignment pass has run
    pub fn offset(&self) -> Option<i32> {
        self.offset
    }

    pub fn is_global(&self) -> bool {
        self.is_global
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.offset, self.is_global) {
            (Some(_), true) => write!(f, "global, {}", self.ty),
            (Some(offset), false) => write!(f, "{}, {}", offset, self.ty),
            (None, _) => write!(f, "{}", self.ty),
        }
    }
}

/// A struct definition: its name and its own field namespace
#[derive(Debug)]
pub struct StructDef {
    pub name: String,
    /// Field name -> symbol. Used as a flat namespace, never pushed or popped
    pub fields: SymbolTable,
}

/// Arena owning every symbol and struct definition of a compilation unit
#[derive(Debug, Default)]
pub struct SymbolStore {
    symbols: Vec<Symbol>,
    structs: Vec<StructDef>,
}

impl SymbolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a symbol and hand back its id
    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len());
        self.symbols.push(symbol);
        id
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Append a parameter type to a function symbol's signature
    pub fn push_param(&mut self, func: SymbolId, param: Type) -> Result<()> {
        match &mut self.symbols[func.0].ty {
            Type::Function { params, .. } => {
                params.push(param);
                Ok(())
            }
            other => Err(Error::InvalidArgument(format!(
                "cannot add a parameter to non-function type {}",
                other
            ))),
        }
    }

    /// Record a symbol's storage offset. Each symbol is written at most once
    pub fn assign_offset(&mut self, id: SymbolId, offset: i32) -> Result<()> {
        let symbol = &mut self.symbols[id.0];
        if symbol.offset.is_some() {
            return Err(Error::OffsetAlreadyAssigned);
        }
        symbol.offset = Some(offset);
        Ok(())
    }

    pub fn add_struct(&mut self, def: StructDef) -> StructId {
        let id = StructId(self.structs.len());
        self.structs.push(def);
        id
    }

    pub fn struct_def(&self, id: StructId) -> &StructDef {
        &self.structs[id.0]
    }

    /// Look up a field in a struct's own namespace
    pub fn field(&self, id: StructId, name: &str) -> Result<Option<SymbolId>> {
        self.structs[id.0].fields.lookup_innermost(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_param_builds_signature() {
        let mut store = SymbolStore::new();
        let f = store.alloc(Symbol::new(Type::function(Type::Int), true));
        store.push_param(f, Type::Int).unwrap();
        store.push_param(f, Type::Bool).unwrap();
        assert_eq!(store.symbol(f).ty().to_string(), "int,bool->int");
    }

    #[test]
    fn test_push_param_rejects_non_function() {
        let mut store = SymbolStore::new();
        let x = store.alloc(Symbol::new(Type::Int, false));
        assert!(matches!(store.push_param(x, Type::Int), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_offset_written_once() {
        let mut store = SymbolStore::new();
        let x = store.alloc(Symbol::new(Type::Int, false));
        assert_eq!(store.symbol(x).offset(), None);
        store.assign_offset(x, -8).unwrap();
        assert_eq!(store.assign_offset(x, -12), Err(Error::OffsetAlreadyAssigned));
        assert_eq!(store.symbol(x).offset(), Some(-8));
        assert_eq!(store.symbol(x).to_string(), "-8, int");
    }

    #[test]
    fn test_global_symbol_display() {
        let mut store = SymbolStore::new();
        let g = store.alloc(Symbol::new(Type::Bool, true));
        assert_eq!(store.symbol(g).to_string(), "bool");
        store.assign_offset(g, 0).unwrap();
        assert_eq!(store.symbol(g).to_string(), "global, bool");
    }
}
