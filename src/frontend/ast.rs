//! Abstract Syntax Tree definitions for C--
//!
//! The tree arrives from the parser fully shaped. Name resolution only
//! writes the annotation slots (`IdNode::symbol`, `DotAccess::state`),
//! which are never part of the serialized form.

use serde::{Deserialize, Serialize};

use crate::frontend::symbols::SymbolId;
use crate::types::StructId;
use crate::utils::Position;

/// A complete program (compilation unit)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    pub decls: Vec<Decl>,
}

/// Declarations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
    Struct(StructDecl),
}

/// `type id;`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarDecl {
    pub ty: TypeNode,
    pub id: IdNode,
}

/// `type id(formals) { body }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FnDecl {
    pub ret: TypeNode,
    pub id: IdNode,
    pub formals: Vec<FormalDecl>,
    pub body: Block,
}

/// Function parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormalDecl {
    pub ty: TypeNode,
    pub id: IdNode,
}

/// `struct id { fields };`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructDecl {
    pub id: IdNode,
    pub fields: Vec<VarDecl>,
}

/// Declared type, as written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TypeNode {
    Int,
    Bool,
    Void,
    /// `struct Name`; the identifier is bound to the struct definition
    Struct(IdNode),
}

/// Local declarations followed by statements. Function bodies and the
/// bodies of if/else/while/repeat each open their own scope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
}

/// Statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    Assign(AssignExp),
    PostInc(Exp),
    PostDec(Exp),
    /// `cin >> exp;`
    Read(Exp),
    /// `cout << exp;`
    Write(Exp),
    If {
        cond: Exp,
        body: Block,
    },
    IfElse {
        cond: Exp,
        then_body: Block,
        else_body: Block,
    },
    While {
        cond: Exp,
        body: Block,
    },
    Repeat {
        count: Exp,
        body: Block,
    },
    Call(CallExp),
    Return(Option<Exp>),
}

/// Expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Exp {
    IntLit { value: i32, pos: Position },
    StrLit { value: String, pos: Position },
    True(Position),
    False(Position),
    Id(IdNode),
    Dot(DotAccess),
    Assign(Box<AssignExp>),
    Call(CallExp),
    Unary { op: UnOp, exp: Box<Exp> },
    Binary { op: BinOp, lhs: Box<Exp>, rhs: Box<Exp> },
}

impl Exp {
    pub fn id(name: &str, line: u32, column: u32) -> Self {
        Self::Id(IdNode::new(name, line, column))
    }

    pub fn unary(op: UnOp, exp: Exp) -> Self {
        Self::Unary { op, exp: Box::new(exp) }
    }

    pub fn binary(op: BinOp, lhs: Exp, rhs: Exp) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

/// `lhs = rhs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignExp {
    pub lhs: Exp,
    pub rhs: Exp,
}

/// `callee(args)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallExp {
    pub callee: IdNode,
    pub args: Vec<Exp>,
}

/// Field selection `base.field`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DotAccess {
    pub base: DotBase,
    pub field: IdNode,
    #[serde(skip)]
    pub state: DotState,
}

impl DotAccess {
    pub fn new(base: DotBase, field: IdNode) -> Self {
        Self {
            base,
            field,
            state: DotState::Unresolved,
        }
    }

    /// Extend this access with one more `.field`
    pub fn then(self, field: IdNode) -> Self {
        Self::new(DotBase::Dot(Box::new(self)), field)
    }
}

/// Left operand of a field selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DotBase {
    Id(IdNode),
    Dot(Box<DotAccess>),
}

/// Outcome of resolving a field selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DotState {
    #[default]
    Unresolved,
    /// The selection is in error; anything chained onto it stays silent
    Invalid,
    /// The field resolved; `field_struct` is set when the field itself has a
    /// struct type, so a further `.x` can be resolved against it
    Valid { field_struct: Option<StructId> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Plus,
    Minus,
    Times,
    Divide,
    And,
    Or,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEq,
    GreaterEq,
}

/// Identifier occurrence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdNode {
    pub name: String,
    pub pos: Position,
    #[serde(skip)]
    symbol: Option<SymbolId>,
}

impl IdNode {
    pub fn new(name: &str, line: u32, column: u32) -> Self {
        Self {
            name: name.to_string(),
            pos: Position::new(line, column),
            symbol: None,
        }
    }

    /// The declaration this identifier was resolved to
    pub fn symbol(&self) -> Option<SymbolId> {
        self.symbol
    }

    /// Record the resolved declaration. The first binding wins
    pub fn bind(&mut self, symbol: SymbolId) {
        if self.symbol.is_none() {
            self.symbol = Some(symbol);
        }
    }
}
