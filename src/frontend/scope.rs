//! Scopes and the scope stack (symbol table)

use std::collections::HashMap;

use crate::frontend::symbols::{SymbolId, SymbolStore};
use crate::utils::{Error, Result};

/// One level of name bindings
#[derive(Debug, Default)]
pub struct Scope {
    symbols: HashMap<String, SymbolId>,
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Bindings sorted by name
    pub fn bindings(&self) -> Vec<(&str, SymbolId)> {
        let mut bindings: Vec<_> = self
            .symbols
            .iter()
            .map(|(name, id)| (name.as_str(), *id))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings
    }
}

/// Symbol table with nested scopes. The innermost scope is the last one
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    /// Create a table holding a single, empty scope
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Number of scopes currently on the stack
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Enter a new scope
    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
        log::trace!("enter scope (depth {})", self.scopes.len());
    }

    /// Exit the current scope
    pub fn exit_scope(&mut self) -> Result<()> {
        self.scopes.pop().ok_or(Error::EmptyScopeStack)?;
        log::trace!("exit scope (depth {})", self.scopes.len());
        Ok(())
    }

    /// Bind `name` in the innermost scope. An existing binding is never
    /// overwritten
    pub fn declare(&mut self, name: &str, symbol: SymbolId) -> Result<()> {
        let scope = self.scopes.last_mut().ok_or(Error::EmptyScopeStack)?;
        if name.is_empty() {
            return Err(Error::InvalidArgument("empty symbol name".to_string()));
        }
        if scope.symbols.contains_key(name) {
            return Err(Error::DuplicateDeclaration {
                name: name.to_string(),
                pos: Default::default(),
            });
        }
        log::trace!("declare {} -> {:?}", name, symbol);
        scope.symbols.insert(name.to_string(), symbol);
        Ok(())
    }

    /// Look up a symbol only in the innermost scope
    pub fn lookup_innermost(&self, name: &str) -> Result<Option<SymbolId>> {
        let scope = self.scopes.last().ok_or(Error::EmptyScopeStack)?;
        Ok(scope.get(name))
    }

    /// Look up a symbol, searching from the innermost scope outward
    pub fn lookup_visible(&self, name: &str) -> Result<Option<SymbolId>> {
        if self.scopes.is_empty() {
            return Err(Error::EmptyScopeStack);
        }
        Ok(self.scopes.iter().rev().find_map(|scope| scope.get(name)))
    }

    /// The outermost scope, if any
    pub fn outermost(&self) -> Option<&Scope> {
        self.scopes.first()
    }

    /// Drop every scope but the outermost one
    pub fn into_outermost(mut self) -> Self {
        self.scopes.truncate(1);
        self
    }

    /// Render every scope, innermost first
    pub fn dump(&self, store: &SymbolStore) -> String {
        let mut out = String::new();
        out.push_str("\nSym Table\n");
        for scope in self.scopes.iter().rev() {
            let entries: Vec<String> = scope
                .bindings()
                .into_iter()
                .map(|(name, id)| format!("{}={}", name, store.symbol(id)))
                .collect();
            out.push_str(&format!("{{{}}}\n", entries.join(", ")));
        }
        out.push('\n');
        out
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
