//! Error handling for the name-resolution pass

use crate::utils::Position;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Resolution error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ==================== Contract Violations ====================

    #[error("Symbol table has no scopes")]
    EmptyScopeStack,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage offset already assigned to symbol")]
    OffsetAlreadyAssigned,

    // ==================== Semantic Errors ====================

    #[error("Multiply declared identifier")]
    DuplicateDeclaration { name: String, pos: Position },

    #[error("Undeclared identifier")]
    UndeclaredIdentifier { name: String, pos: Position },

    #[error("Non-function declared void")]
    NonFunctionVoid { name: String, pos: Position },

    #[error("Invalid name of struct type")]
    InvalidStructType { name: String, pos: Position },

    #[error("Invalid struct field name")]
    InvalidFieldAccess { field: String, pos: Position },

    #[error("Dot-access of non-struct type")]
    InvalidDotAccessBase { field: String, pos: Position },
}

impl Error {
    /// Get the source position associated with this error
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::DuplicateDeclaration { pos, .. } => Some(*pos),
            Self::UndeclaredIdentifier { pos, .. } => Some(*pos),
            Self::NonFunctionVoid { pos, .. } => Some(*pos),
            Self::InvalidStructType { pos, .. } => Some(*pos),
            Self::InvalidFieldAccess { pos, .. } => Some(*pos),
            Self::InvalidDotAccessBase { pos, .. } => Some(*pos),
            Self::EmptyScopeStack | Self::InvalidArgument(_) | Self::OffsetAlreadyAssigned => None,
        }
    }

    /// Caller misuse of the symbol table API, as opposed to an error in the
    /// program being resolved
    pub fn is_contract_violation(&self) -> bool {
        self.position().is_none()
    }

    /// Stable code for a contract violation, used by the structured report.
    /// Semantic errors go through the reporter by message and have none
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::EmptyScopeStack => Some("E9001"),
            Self::InvalidArgument(_) => Some("E9002"),
            Self::OffsetAlreadyAssigned => Some("E9003"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_semantic_errors_carry_position() {
        let err = Error::UndeclaredIdentifier {
            name: "y".to_string(),
            pos: Position::new(3, 7),
        };
        assert_eq!(err.position(), Some(Position::new(3, 7)));
        assert!(!err.is_contract_violation());
        assert_eq!(err.to_string(), "Undeclared identifier");
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_contract_violations_have_no_position() {
        assert!(Error::EmptyScopeStack.is_contract_violation());
        assert!(Error::InvalidArgument("empty name".into()).is_contract_violation());
        assert_eq!(Error::EmptyScopeStack.position(), None);
        assert_eq!(Error::OffsetAlreadyAssigned.code(), Some("E9003"));
    }
}
