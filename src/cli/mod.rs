//! Command-line front end
//!
//! Loads the schema and document named by the configuration, runs the
//! validator, and prints the diagnostics.

pub mod output;
pub mod watch;

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use log::LevelFilter;

use crate::config::Config;
use crate::schema::registry::load_schema_file;
use crate::schema::{Schema, SchemaRegistry};
use crate::tree::Node;
use crate::validation::{validate, ValidationResult};

/// Exit status when the document has schema violations
pub const EXIT_INVALID: u8 = 1;
/// Exit status when the schema or document could not be loaded
pub const EXIT_LOAD_ERROR: u8 = 2;

/// Run the validator with arguments from the command line
pub async fn run() -> Result<ExitCode> {
    let config = Config::from_args_and_env()?;
    init_logging(&config.log_level);

    log::debug!("Configuration: {:?}", config);

    if config.watch {
        watch::watch(&config).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let result = check(&config)?;
    let rendered = output::render(&result, config.format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }

    Ok(if result.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    })
}

fn init_logging(level: &str) {
    let level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}

/// Load everything the configuration names and validate once
pub fn check(config: &Config) -> Result<ValidationResult> {
    let schema = load_schema(config)?;
    let document = load_document(&config.document)?;
    Ok(validate(&document, &schema))
}

/// Resolve the schema: an explicit file, or a registered schema by name
pub fn load_schema(config: &Config) -> Result<Schema> {
    if let Some(path) = &config.schema_file {
        log::info!("Using schema file {}", path.display());
        return load_schema_file(path);
    }

    let mut registry = SchemaRegistry::with_builtin()?;
    registry.load_directories(&config.schema_dirs)?;

    let name = config.effective_schema();
    let loaded = registry.get(name).with_context(|| {
        format!(
            "Schema '{}' not found (available: {})",
            name,
            registry.list_schemas().join(", ")
        )
    })?;

    log::info!(
        "Using schema '{}' from {}",
        name,
        loaded
            .source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );

    Ok(loaded.schema.clone())
}

/// Read a document tree from its JSON interchange form
pub fn load_document(path: &Path) -> Result<Node> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse document tree: {}", path.display()))
}
