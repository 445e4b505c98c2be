//! Type descriptors recorded on symbols during name resolution

use std::fmt;

/// Handle to a struct definition held by a `SymbolStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructId(pub(crate) usize);

impl StructId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Reference from a struct-typed value back to its definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructRef {
    pub id: StructId,
    /// Name the struct was declared under, kept for display
    pub name: String,
}

/// Type of a declared name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Bool,
    Void,
    /// A value whose type is a named struct
    Struct(StructRef),
    /// A function; parameters are filled in left to right while the
    /// formals are resolved
    Function { params: Vec<Type>, ret: Box<Type> },
    /// The struct definition itself, owning the field namespace
    StructDef(StructId),
    /// Stand-in for a type that failed to resolve, such as a function
    /// returning an undeclared struct
    Unknown,
}

impl Type {
    pub fn function(ret: Type) -> Self {
        Self::Function {
            params: Vec::new(),
            ret: Box::new(ret),
        }
    }

    /// The definition a struct-typed value refers to
    pub fn struct_id(&self) -> Option<StructId> {
        match self {
            Self::Struct(r) => Some(r.id),
            _ => None,
        }
    }

    /// The definition a struct-definition symbol owns
    pub fn struct_def_id(&self) -> Option<StructId> {
        match self {
            Self::StructDef(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
            Self::Void => write!(f, "void"),
            Self::Struct(r) => write!(f, "{}", r.name),
            Self::StructDef(_) => write!(f, "struct"),
            Self::Unknown => write!(f, "unknown"),
            Self::Function { params, ret } => {
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, "->{}", ret)
            }
        }
    }
}
