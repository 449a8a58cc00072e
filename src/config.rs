//! Configuration management for the Hypermark validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project configuration (`.hypermark.toml`)
//! - Schema directory configuration

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::schema::{SchemaPriority, BUILTIN_SCHEMA};

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".hypermark.toml";

/// Command-line arguments for the Hypermark validator
#[derive(Debug, Parser)]
#[command(name = "hm-validate")]
#[command(about = "Validate Hypermark document trees against a schema")]
#[command(version)]
pub struct Args {
    /// Parsed document tree (JSON)
    pub document: PathBuf,

    /// Name of a registered schema to validate against
    #[arg(long, help = "Schema name (e.g., 'core')")]
    pub schema: Option<String>,

    /// Validate against this schema file instead of a registered schema
    #[arg(long, conflicts_with = "schema", help = "Path to a .hm-schema.toml file")]
    pub schema_file: Option<PathBuf>,

    /// Custom directory to search for schema files
    #[arg(long, help = "Directory containing .hm-schema.toml files")]
    pub schema_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Re-validate whenever the document or schema files change
    #[arg(long)]
    pub watch: bool,

    /// Log level for diagnostics on stderr
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// How diagnostics are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `Error HM<code>: <message>` line per diagnostic
    Text,
    /// A JSON array of structured diagnostics
    Json,
}

/// Contents of `.hypermark.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub schema: Option<String>,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Document tree to validate
    pub document: PathBuf,
    /// Schema name explicitly set via command line
    pub cli_schema: Option<String>,
    /// Schema file explicitly set via command line
    pub schema_file: Option<PathBuf>,
    /// Schema name from project config
    pub project_schema: Option<String>,
    /// Path of the project config, if one was found
    pub project_config_path: Option<PathBuf>,
    /// Schema directories, lowest priority first
    pub schema_dirs: Vec<(PathBuf, SchemaPriority)>,
    pub format: OutputFormat,
    pub watch: bool,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments, using the current directory as project root
    pub fn from_args(args: Args) -> Result<Self> {
        let root = std::env::current_dir().context("Failed to determine current directory")?;
        Self::from_args_in(args, &root)
    }

    /// Create configuration from explicit arguments and project root (useful for testing)
    pub fn from_args_in(args: Args, project_root: &Path) -> Result<Self> {
        let mut schema_dirs = Vec::new();

        // Add user-specified directory if provided
        if let Some(custom_dir) = args.schema_dir {
            schema_dirs.push((custom_dir, SchemaPriority::Custom));
        }

        // Add default user config directory
        if let Some(config_dir) = dirs::config_dir() {
            schema_dirs.push((
                config_dir.join("hypermark").join("schemas"),
                SchemaPriority::UserGlobal,
            ));
        }

        schema_dirs.push((
            project_root.join(".hypermark").join("schemas"),
            SchemaPriority::Workspace,
        ));

        let project_config_path = project_root.join(PROJECT_CONFIG_FILE);
        let (project_schema, project_config_path) = if project_config_path.is_file() {
            let project = load_project_config(&project_config_path)?;
            (project.schema, Some(project_config_path))
        } else {
            (None, None)
        };

        Ok(Config {
            document: args.document,
            cli_schema: args.schema,
            schema_file: args.schema_file,
            project_schema,
            project_config_path,
            schema_dirs,
            format: args.format,
            watch: args.watch,
            log_level: args.log_level,
        })
    }

    /// Schema name to use: CLI > project config > built-in default
    pub fn effective_schema(&self) -> &str {
        self.cli_schema
            .as_deref()
            .or(self.project_schema.as_deref())
            .unwrap_or(BUILTIN_SCHEMA)
    }

    pub fn has_project_config(&self) -> bool {
        self.project_config_path.is_some()
    }
}

/// Read and parse a project configuration file
pub fn load_project_config(path: &Path) -> Result<ProjectConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read project config: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse project config: {}", path.display()))
}
