//! Document Tree
//!
//! The block/inline tree produced by the Hypermark parser. Read-only to the validator.

pub mod node;

pub use node::{BlockElement, InlineElement, Node};
