//! Validation Engine
//!
//! Clean separation of validation logic from tree parsing and schema loading.

pub mod cardinality;
pub mod engine;

pub use engine::{validate, validate_block, validate_inline, ValidationResult};
