//! Diagnostic Model
//!
//! Structured validation errors with stable codes, and the rendered view
//! callers print or filter on.

pub mod error;
pub mod message;

use std::fmt;

use serde::Serialize;

pub use error::ValidationError;

/// Rendered form of a [`ValidationError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: u16,
    pub message: String,
}

impl From<&ValidationError> for Diagnostic {
    fn from(error: &ValidationError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error HM{}: {}", self.code, self.message)
    }
}
