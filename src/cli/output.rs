//! Diagnostic output formats.

use anyhow::Result;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::diagnostics::ValidationError;
use crate::validation::ValidationResult;

#[derive(Debug, Serialize)]
struct JsonDiagnostic<'a> {
    code: u16,
    message: String,
    error: &'a ValidationError,
}

/// Render a validation result for stdout
pub fn render(result: &ValidationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(result
            .diagnostics()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let entries: Vec<JsonDiagnostic<'_>> = result
                .errors
                .iter()
                .map(|error| JsonDiagnostic {
                    code: error.code(),
                    message: error.to_string(),
                    error,
                })
                .collect();
            Ok(serde_json::to_string_pretty(&entries)?)
        }
    }
}
