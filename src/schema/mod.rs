//! Schema System
//!
//! Declarative tag rules, their TOML file format, and the named-schema registry.

pub mod file;
pub mod registry;
pub mod types;

pub use file::SchemaFile;
pub use registry::{LoadedSchema, SchemaPriority, SchemaRegistry, BUILTIN_SCHEMA};
pub use types::{Cardinality, Constraint, Kind, Schema, TagRule};
