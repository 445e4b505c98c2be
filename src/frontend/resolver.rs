//! Name resolution for C--
//!
//! Performs:
//! - Scope management (function bodies and if/else/while/repeat blocks)
//! - Declaration of variables, functions, formals and struct fields
//! - Binding of every identifier occurrence to its declaration
//! - Field selection through struct field namespaces, including chains
//!
//! Semantic errors are reported and the walk continues, so one run reports
//! everything it can find. Only contract violations of the symbol table are
//! propagated as `Err`; they abandon the current subtree and are logged.

use crate::frontend::ast::*;
use crate::frontend::reporter::ErrorReporter;
use crate::frontend::scope::SymbolTable;
use crate::frontend::symbols::{StructDef, Symbol, SymbolId, SymbolStore};
use crate::types::{StructId, StructRef, Type};
use crate::utils::{Error, Position, Result};

/// Output of a resolution run, handed to later passes
#[derive(Debug)]
pub struct Resolution {
    /// Every symbol and struct definition created by the run
    pub store: SymbolStore,
    /// The global symbol table (outermost scope only)
    pub globals: SymbolTable,
    /// Number of semantic diagnostics sent to the reporter
    pub error_count: usize,
    /// Symbol table contract violations hit during the walk
    pub internal_errors: Vec<Error>,
}

impl Resolution {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0 || !self.internal_errors.is_empty()
    }

    /// Look up a global declaration by name
    pub fn global(&self, name: &str) -> Option<&Symbol> {
        self.globals
            .lookup_innermost(name)
            .ok()
            .flatten()
            .map(|id| self.store.symbol(id))
    }

    /// Textual listing of the global table
    pub fn dump(&self) -> String {
        self.globals.dump(&self.store)
    }
}

/// Name resolver
pub struct Resolver<'r> {
    store: SymbolStore,
    symbols: SymbolTable,
    reporter: &'r mut dyn ErrorReporter,
    error_count: usize,
    internal_errors: Vec<Error>,
}

impl<'r> Resolver<'r> {
    pub fn new(reporter: &'r mut dyn ErrorReporter) -> Self {
        Self {
            store: SymbolStore::new(),
            symbols: SymbolTable::new(),
            reporter,
            error_count: 0,
            internal_errors: Vec::new(),
        }
    }

    /// Resolve a program, annotating it in place
    pub fn resolve_program(mut self, program: &mut Program) -> Resolution {
        for decl in &mut program.decls {
            if let Err(e) = self.resolve_decl(decl) {
                self.internal(e);
            }
        }

        log::debug!(
            "name resolution finished: {} symbols, {} errors, {} internal errors",
            self.store.len(),
            self.error_count,
            self.internal_errors.len()
        );

        Resolution {
            store: self.store,
            globals: self.symbols.into_outermost(),
            error_count: self.error_count,
            internal_errors: self.internal_errors,
        }
    }

    // ==================== Diagnostics ====================

    fn report(&mut self, error: Error) {
        match error.position() {
            Some(pos) => {
                self.error_count += 1;
                self.reporter.report(pos.line, pos.column, &error.to_string());
            }
            None => self.internal(error),
        }
    }

    fn internal(&mut self, error: Error) {
        log::error!("symbol table misuse during name resolution: {}", error);
        self.internal_errors.push(error);
    }

    // ==================== Scopes ====================

    fn at_global_scope(&self) -> bool {
        self.symbols.depth() == 1
    }

    /// Run `f` inside a fresh scope. The scope is popped even when `f` fails
    fn in_scope<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.symbols.enter_scope();
        let result = f(self);
        if let Err(e) = self.symbols.exit_scope() {
            self.internal(e);
        }
        result
    }

    /// Bind the declaring identifier once `declare` went through; a
    /// duplicate is reported at the identifier. Returns whether it bound
    fn finish_declare(&mut self, result: Result<()>, id: &mut IdNode, symbol: SymbolId) -> Result<bool> {
        match result {
            Ok(()) => {
                log::debug!("declared {} : {}", id.name, self.store.symbol(symbol));
                id.bind(symbol);
                Ok(true)
            }
            Err(Error::DuplicateDeclaration { name, .. }) => {
                self.report(Error::DuplicateDeclaration { name, pos: id.pos });
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    // ==================== Declarations ====================

    fn resolve_decl(&mut self, decl: &mut Decl) -> Result<()> {
        match decl {
            Decl::Var(var) => self.resolve_var_decl(var, None),
            Decl::Fn(func) => self.resolve_fn_decl(func),
            Decl::Struct(def) => self.resolve_struct_decl(def),
        }
    }

    /// Resolve a declared type. Struct names are looked up in the enclosing
    /// table, never in a struct's own fields. `None` means the error has been
    /// reported and the caller decides what to drop
    fn resolve_type(&mut self, ty: &mut TypeNode, declared: Position) -> Result<Option<Type>> {
        let name = match ty {
            TypeNode::Int => return Ok(Some(Type::Int)),
            TypeNode::Bool => return Ok(Some(Type::Bool)),
            TypeNode::Void => return Ok(Some(Type::Void)),
            TypeNode::Struct(name) => name,
        };

        let def = self
            .symbols
            .lookup_visible(&name.name)?
            .and_then(|id| self.store.symbol(id).ty().struct_def_id().map(|def| (id, def)));

        match def {
            Some((symbol, def)) => {
                name.bind(symbol);
                Ok(Some(Type::Struct(StructRef {
                    id: def,
                    name: name.name.clone(),
                })))
            }
            None => {
                self.report(Error::InvalidStructType {
                    name: name.name.clone(),
                    pos: declared,
                });
                Ok(None)
            }
        }
    }

    /// Declare a variable into the current scope, or into `fields` when it is
    /// a struct field
    fn resolve_var_decl(&mut self, decl: &mut VarDecl, fields: Option<&mut SymbolTable>) -> Result<()> {
        if matches!(decl.ty, TypeNode::Void) {
            self.report(Error::NonFunctionVoid {
                name: decl.id.name.clone(),
                pos: decl.id.pos,
            });
            return Ok(());
        }
        let Some(ty) = self.resolve_type(&mut decl.ty, decl.id.pos)? else {
            return Ok(());
        };

        let is_global = fields.is_none() && self.at_global_scope();
        let symbol = self.store.alloc(Symbol::new(ty, is_global));
        let result = match fields {
            Some(table) => table.declare(&decl.id.name, symbol),
            None => self.symbols.declare(&decl.id.name, symbol),
        };
        self.finish_declare(result, &mut decl.id, symbol)?;
        Ok(())
    }

    fn resolve_fn_decl(&mut self, func: &mut FnDecl) -> Result<()> {
        // The name goes into the enclosing scope first so the body can call it.
        // A bad return type is reported but the function is still declared
        let ret = self
            .resolve_type(&mut func.ret, func.id.pos)?
            .unwrap_or(Type::Unknown);
        let func_symbol = self
            .store
            .alloc(Symbol::new(Type::function(ret), self.at_global_scope()));
        let result = self.symbols.declare(&func.id.name, func_symbol);
        self.finish_declare(result, &mut func.id, func_symbol)?;

        let formals = &mut func.formals;
        let body = &mut func.body;
        self.in_scope(|this| {
            for formal in formals.iter_mut() {
                this.resolve_formal(formal, func_symbol)?;
            }
            this.resolve_block(body)
        })
    }

    fn resolve_formal(&mut self, formal: &mut FormalDecl, func: SymbolId) -> Result<()> {
        if matches!(formal.ty, TypeNode::Void) {
            self.report(Error::NonFunctionVoid {
                name: formal.id.name.clone(),
                pos: formal.id.pos,
            });
            return Ok(());
        }
        let Some(ty) = self.resolve_type(&mut formal.ty, formal.id.pos)? else {
            return Ok(());
        };

        let symbol = self.store.alloc(Symbol::new(ty.clone(), false));
        let result = self.symbols.declare(&formal.id.name, symbol);
        if self.finish_declare(result, &mut formal.id, symbol)? {
            self.store.push_param(func, ty)?;
        }
        Ok(())
    }

    fn resolve_struct_decl(&mut self, decl: &mut StructDecl) -> Result<()> {
        let mut fields = SymbolTable::new();
        for field in &mut decl.fields {
            self.resolve_var_decl(field, Some(&mut fields))?;
        }

        let def = self.store.add_struct(StructDef {
            name: decl.id.name.clone(),
            fields,
        });
        let symbol = self
            .store
            .alloc(Symbol::new(Type::StructDef(def), self.at_global_scope()));
        let result = self.symbols.declare(&decl.id.name, symbol);
        self.finish_declare(result, &mut decl.id, symbol)?;
        Ok(())
    }

    // ==================== Statements ====================

    /// Declarations then statements, in the current scope
    fn resolve_block(&mut self, block: &mut Block) -> Result<()> {
        for decl in &mut block.decls {
            self.resolve_var_decl(decl, None)?;
        }
        for stmt in &mut block.stmts {
            self.resolve_stmt(stmt)?;
        }
        Ok(())
    }

    fn resolve_scoped_block(&mut self, block: &mut Block) -> Result<()> {
        self.in_scope(|this| this.resolve_block(block))
    }

    fn resolve_stmt(&mut self, stmt: &mut Stmt) -> Result<()> {
        match stmt {
            Stmt::Assign(assign) => self.resolve_assign(assign),
            Stmt::PostInc(exp) | Stmt::PostDec(exp) | Stmt::Read(exp) | Stmt::Write(exp) => {
                self.resolve_exp(exp)
            }
            // The controlling expression sees the enclosing scope only
            Stmt::If { cond, body }
            | Stmt::While { cond, body }
            | Stmt::Repeat { count: cond, body } => {
                self.resolve_exp(cond)?;
                self.resolve_scoped_block(body)
            }
            Stmt::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                self.resolve_exp(cond)?;
                self.resolve_scoped_block(then_body)?;
                self.resolve_scoped_block(else_body)
            }
            Stmt::Call(call) => self.resolve_call(call),
            Stmt::Return(Some(exp)) => self.resolve_exp(exp),
            Stmt::Return(None) => Ok(()),
        }
    }

    // ==================== Expressions ====================

    fn resolve_exp(&mut self, exp: &mut Exp) -> Result<()> {
        match exp {
            Exp::IntLit { .. } | Exp::StrLit { .. } | Exp::True(_) | Exp::False(_) => Ok(()),
            Exp::Id(id) => self.resolve_id(id),
            Exp::Dot(access) => self.resolve_dot(access),
            Exp::Assign(assign) => self.resolve_assign(assign),
            Exp::Call(call) => self.resolve_call(call),
            Exp::Unary { exp, .. } => self.resolve_exp(exp),
            Exp::Binary { lhs, rhs, .. } => {
                self.resolve_exp(lhs)?;
                self.resolve_exp(rhs)
            }
        }
    }

    fn resolve_assign(&mut self, assign: &mut AssignExp) -> Result<()> {
        self.resolve_exp(&mut assign.lhs)?;
        self.resolve_exp(&mut assign.rhs)
    }

    fn resolve_call(&mut self, call: &mut CallExp) -> Result<()> {
        self.resolve_id(&mut call.callee)?;
        for arg in &mut call.args {
            self.resolve_exp(arg)?;
        }
        Ok(())
    }

    fn resolve_id(&mut self, id: &mut IdNode) -> Result<()> {
        let found = match self.symbols.lookup_innermost(&id.name)? {
            Some(symbol) => Some(symbol),
            None => self.symbols.lookup_visible(&id.name)?,
        };
        match found {
            Some(symbol) => id.bind(symbol),
            None => self.report(Error::UndeclaredIdentifier {
                name: id.name.clone(),
                pos: id.pos,
            }),
        }
        Ok(())
    }

    /// Resolve `base.field`, leaving the outcome in `access.state`
    fn resolve_dot(&mut self, access: &mut DotAccess) -> Result<()> {
        let base = match &mut access.base {
            DotBase::Id(id) => {
                self.resolve_id(id)?;
                let def = id
                    .symbol()
                    .and_then(|symbol| self.store.symbol(symbol).ty().struct_id());
                if def.is_none() {
                    self.report_non_struct(&access.field);
                }
                def
            }
            DotBase::Dot(inner) => {
                self.resolve_dot(inner)?;
                match inner.state {
                    DotState::Valid { field_struct: Some(def) } => Some(def),
                    DotState::Valid { field_struct: None } => {
                        self.report_non_struct(&access.field);
                        None
                    }
                    DotState::Invalid | DotState::Unresolved => None,
                }
            }
        };

        access.state = match base {
            Some(def) => self.select_field(def, &mut access.field)?,
            None => DotState::Invalid,
        };
        Ok(())
    }

    fn report_non_struct(&mut self, field: &IdNode) {
        self.report(Error::InvalidDotAccessBase {
            field: field.name.clone(),
            pos: field.pos,
        });
    }

    /// Look `field` up in the struct's own namespace
    fn select_field(&mut self, def: StructId, field: &mut IdNode) -> Result<DotState> {
        match self.store.field(def, &field.name)? {
            Some(symbol) => {
                field.bind(symbol);
                Ok(DotState::Valid {
                    field_struct: self.store.symbol(symbol).ty().struct_id(),
                })
            }
            None => {
                self.report(Error::InvalidFieldAccess {
                    field: field.name.clone(),
                    pos: field.pos,
                });
                Ok(DotState::Invalid)
            }
        }
    }
}

/// Resolve `program` with a fresh resolver
pub fn resolve(program: &mut Program, reporter: &mut dyn ErrorReporter) -> Resolution {
    Resolver::new(reporter).resolve_program(program)
}
