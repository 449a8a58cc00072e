//! Validation error variants.
//!
//! Codes are grouped by family:
//! - 100 unknown tag
//! - 11x block/inline misuse
//! - 12x disallowed placement
//! - 130 cardinality
//! - 140 argument count

use serde::Serialize;
use thiserror::Error;

use super::message::{argument_position, requirement};
use crate::schema::Constraint;

/// One schema violation found in a document tree
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ValidationError {
    #[error("Unknown tag '#{tag}'")]
    UnknownTag { tag: String },

    /// A block element whose tag the schema declares inline
    #[error("Expected '{tag}' to be used as an inline tag")]
    InlineUsedAsBlock { tag: String },

    /// An inline element whose tag the schema declares block
    #[error("Expected '{tag}' to be used as a block tag")]
    BlockUsedAsInline { tag: String },

    #[error("Tag '#{tag}' is not allowed in '#{parent}'")]
    DisallowedInBlock { parent: String, tag: String },

    #[error(
        "Tag '#{tag}' is not allowed in the {} argument of '#{parent}'",
        argument_position(.index)
    )]
    DisallowedInArg {
        parent: String,
        index: usize,
        tag: String,
    },

    #[error("Tag '#{tag}' is not allowed in the head of '#{parent}'")]
    DisallowedInHead { parent: String, tag: String },

    #[error(
        "Saw {count} occurrences of '{tag}' in {parent}, but the schema requires {} in {parent}",
        requirement(.cardinality)
    )]
    Cardinality {
        parent: String,
        /// Tags of all the parent's children, in order
        children: Vec<String>,
        tag: String,
        count: usize,
        cardinality: Constraint,
    },

    #[error("Expected '#{tag}' to have {expected} arguments, but got {actual} instead")]
    ArgumentCount {
        tag: String,
        expected: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Stable numeric code
    pub fn code(&self) -> u16 {
        match self {
            ValidationError::UnknownTag { .. } => 100,
            ValidationError::InlineUsedAsBlock { .. } => 110,
            ValidationError::BlockUsedAsInline { .. } => 111,
            ValidationError::DisallowedInBlock { .. } => 120,
            ValidationError::DisallowedInArg { .. } => 121,
            ValidationError::DisallowedInHead { .. } => 122,
            ValidationError::Cardinality { .. } => 130,
            ValidationError::ArgumentCount { .. } => 140,
        }
    }

    /// The tag of the offending node
    pub fn tag(&self) -> &str {
        match self {
            ValidationError::UnknownTag { tag }
            | ValidationError::InlineUsedAsBlock { tag }
            | ValidationError::BlockUsedAsInline { tag }
            | ValidationError::DisallowedInBlock { tag, .. }
            | ValidationError::DisallowedInArg { tag, .. }
            | ValidationError::DisallowedInHead { tag, .. }
            | ValidationError::Cardinality { tag, .. }
            | ValidationError::ArgumentCount { tag, .. } => tag,
        }
    }

    /// The enclosing element's tag, for placement and cardinality errors
    pub fn parent(&self) -> Option<&str> {
        match self {
            ValidationError::DisallowedInBlock { parent, .. }
            | ValidationError::DisallowedInArg { parent, .. }
            | ValidationError::DisallowedInHead { parent, .. }
            | ValidationError::Cardinality { parent, .. } => Some(parent.as_str()),
            ValidationError::UnknownTag { .. }
            | ValidationError::InlineUsedAsBlock { .. }
            | ValidationError::BlockUsedAsInline { .. }
            | ValidationError::ArgumentCount { .. } => None,
        }
    }

    /// `Error HM<code>: <message>`
    pub fn render(&self) -> String {
        format!("Error HM{}: {}", self.code(), self)
    }
}
