//! Schema Registry
//!
//! In-memory registry of named schemas. Loading priority:
//! built-in < custom directory < user-global < workspace.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::file::SchemaFile;
use super::types::Schema;

/// Name of the schema embedded in the binary
pub const BUILTIN_SCHEMA: &str = "core";

/// File suffix recognized when scanning schema directories
pub const SCHEMA_FILE_SUFFIX: &str = ".hm-schema.toml";

const BUILTIN_CONTENT: &str = include_str!("../../resources/schemas/core.hm-schema.toml");

/// Where a loaded schema came from, lowest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchemaPriority {
    BuiltIn = 0,
    Custom = 1,
    UserGlobal = 2,
    Workspace = 3,
}

/// A loaded schema with its source and priority
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    pub schema: Schema,
    pub priority: SchemaPriority,
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, LoadedSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding only the embedded `core` schema
    pub fn with_builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.add_builtin_schema()?;
        Ok(registry)
    }

    /// Add the embedded schema at built-in priority
    pub fn add_builtin_schema(&mut self) -> Result<()> {
        let schema = parse_schema(BUILTIN_CONTENT, None)?;
        self.insert(schema, SchemaPriority::BuiltIn, None);
        Ok(())
    }

    /// Add a schema; it replaces a same-named one unless that one has higher priority.
    /// Returns whether the schema was stored.
    pub fn insert(
        &mut self,
        schema: Schema,
        priority: SchemaPriority,
        source_path: Option<PathBuf>,
    ) -> bool {
        let should_load = match self.schemas.get(&schema.name) {
            Some(existing) => priority >= existing.priority,
            None => true,
        };

        if should_load {
            log::debug!(
                "Registering schema '{}' ({:?}) from {}",
                schema.name,
                priority,
                source_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "built-in".to_string())
            );
            self.schemas.insert(
                schema.name.clone(),
                LoadedSchema {
                    schema,
                    priority,
                    source_path,
                },
            );
        }

        should_load
    }

    /// Load a single schema file and register it
    pub fn load_file(&mut self, path: &Path, priority: SchemaPriority) -> Result<String> {
        let schema = load_schema_file(path)?;
        let name = schema.name.clone();
        self.insert(schema, priority, Some(path.to_path_buf()));
        Ok(name)
    }

    /// Load every `*.hm-schema.toml` file of a directory.
    ///
    /// A missing directory is not an error. Files that fail to load are
    /// logged and skipped. Returns the number of files loaded.
    pub fn load_directory(&mut self, dir: &Path, priority: SchemaPriority) -> Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read schema directory: {}", dir.display()))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_schema_file(path))
            .collect();
        // Same-priority conflicts resolve by file name
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_file(&path, priority) {
                Ok(_) => loaded += 1,
                Err(e) => log::warn!("Skipping schema file {}: {:#}", path.display(), e),
            }
        }

        Ok(loaded)
    }

    /// Load directories in ascending priority order
    pub fn load_directories(&mut self, dirs: &[(PathBuf, SchemaPriority)]) -> Result<()> {
        for (dir, priority) in dirs {
            let count = self.load_directory(dir, *priority)?;
            if count > 0 {
                log::info!("Loaded {} schema(s) from {}", count, dir.display());
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&LoadedSchema> {
        self.schemas.get(name)
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.get(name).map(|loaded| &loaded.schema)
    }

    /// All registered schema names, sorted
    pub fn list_schemas(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Read and convert a schema file
pub fn load_schema_file(path: &Path) -> Result<Schema> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
    parse_schema(&content, Some(path))
}

fn parse_schema(content: &str, source_path: Option<&Path>) -> Result<Schema> {
    let location = || match source_path {
        Some(path) => format!("Invalid schema file: {}", path.display()),
        None => "Invalid built-in schema".to_string(),
    };
    let file = SchemaFile::parse(content).with_context(location)?;
    Schema::try_from(file).with_context(location)
}

fn is_schema_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(SCHEMA_FILE_SUFFIX))
}
