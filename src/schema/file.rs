//! Schema File Format
//!
//! Serde types matching the `*.hm-schema.toml` layout, and their conversion
//! into the runtime [`Schema`].

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;

use super::types::{Cardinality, Kind, Schema, TagRule};

static TAG_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.-]*$").expect("tag name pattern is valid")
});

/// Root schema file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    pub schema: SchemaMeta,
    #[serde(default)]
    pub tags: IndexMap<String, TagDef>,
}

/// Schema metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SchemaMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Tag definition as written in a schema file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TagDef {
    pub kind: Kind,
    #[serde(default)]
    pub children: IndexMap<String, Cardinality>,
    #[serde(default)]
    pub head: Vec<String>,
    #[serde(default)]
    pub args: Vec<Vec<String>>,
    pub arg_count: Option<usize>,
}

impl SchemaFile {
    /// Parse schema file content
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse schema TOML")
    }
}

impl TryFrom<SchemaFile> for Schema {
    type Error = anyhow::Error;

    fn try_from(file: SchemaFile) -> Result<Self> {
        let mut tags = HashMap::with_capacity(file.tags.len());

        for (name, def) in file.tags {
            let tag = normalize_tag(&name)?;
            let rule = def
                .into_rule()
                .with_context(|| format!("Invalid definition for tag '#{tag}'"))?;
            if tags.insert(tag.clone(), rule).is_some() {
                bail!("Tag '#{tag}' is defined more than once");
            }
        }

        Ok(Self {
            name: file.schema.name,
            version: file.schema.version,
            description: file.schema.description,
            tags,
        })
    }
}

impl TagDef {
    fn into_rule(self) -> Result<TagRule> {
        match self.kind {
            Kind::Block => {
                if !self.args.is_empty() || self.arg_count.is_some() {
                    bail!("block tags cannot declare arguments");
                }
            }
            Kind::Inline => {
                if !self.children.is_empty() || !self.head.is_empty() {
                    bail!("inline tags cannot declare children or head content");
                }
            }
        }

        let arg_count = match self.arg_count {
            Some(count) if count < self.args.len() => bail!(
                "arg_count is {count} but {} argument slots are declared",
                self.args.len()
            ),
            Some(count) => count,
            None => self.args.len(),
        };

        let mut children = IndexMap::with_capacity(self.children.len());
        for (child, cardinality) in self.children {
            children.insert(normalize_tag(&child)?, cardinality);
        }

        let head = self
            .head
            .iter()
            .map(|tag| normalize_tag(tag))
            .collect::<Result<_>>()?;

        let args = self
            .args
            .iter()
            .map(|slot| {
                slot.iter()
                    .map(|tag| normalize_tag(tag))
                    .collect::<Result<HashSet<_>>>()
            })
            .collect::<Result<_>>()?;

        Ok(TagRule {
            kind: self.kind,
            children,
            args,
            arg_count,
            head,
        })
    }
}

/// Strip an optional leading '#' and check the tag name syntax
fn normalize_tag(raw: &str) -> Result<String> {
    let tag = raw.strip_prefix('#').unwrap_or(raw);
    if !TAG_NAME.is_match(tag) {
        bail!("Invalid tag name '{raw}'");
    }
    Ok(tag.to_string())
}
