//! Type descriptors

pub mod type_system;

pub use type_system::{StructId, StructRef, Type};
