//! Utility module

mod span;
mod error;

pub use span::Position;
pub use error::{Error, Result};
