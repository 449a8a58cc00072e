//! Hypermark Schema Validator
//!
//! Validates parsed Hypermark document trees against declarative schemas.
//!
//! This library provides:
//! - The block/inline document tree model
//! - Schemas: tag kinds, allowed nesting, cardinality, argument and head rules
//! - The validation engine and its coded diagnostics
//! - Schema file loading and the `hm-validate` command-line front end

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod schema;
pub mod tree;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use diagnostics::{Diagnostic, ValidationError};
pub use schema::{Cardinality, Kind, Schema, SchemaRegistry, TagRule};
pub use tree::{BlockElement, InlineElement, Node};
pub use validation::{validate, ValidationResult};
