//! Schema Types
//!
//! Runtime schema representation, optimized for lookups during a validation run.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Whether a tag is used as a block or as an inline element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Block,
    Inline,
}

/// How many times a child tag may occur under its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cardinality {
    One,
    OneOrMore,
    Optional,
    ZeroOrMore,
}

/// The cardinalities that can actually be violated.
///
/// `ZeroOrMore` admits every count, so it has no counterpart here and can
/// never reach the cardinality evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Constraint {
    One,
    OneOrMore,
    Optional,
}

impl Cardinality {
    /// The checkable part of this cardinality, `None` for `ZeroOrMore`
    pub fn constraint(self) -> Option<Constraint> {
        match self {
            Cardinality::One => Some(Constraint::One),
            Cardinality::OneOrMore => Some(Constraint::OneOrMore),
            Cardinality::Optional => Some(Constraint::Optional),
            Cardinality::ZeroOrMore => None,
        }
    }
}

impl Constraint {
    pub fn admits(self, count: usize) -> bool {
        match self {
            Constraint::One => count == 1,
            Constraint::OneOrMore => count >= 1,
            Constraint::Optional => count <= 1,
        }
    }

    /// Name used in schema files
    pub fn name(self) -> &'static str {
        match self {
            Constraint::One => "one",
            Constraint::OneOrMore => "oneOrMore",
            Constraint::Optional => "optional",
        }
    }
}

/// Rules attached to a single tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    pub kind: Kind,
    /// Allowed child tags of a block, in declaration order
    pub children: IndexMap<String, Cardinality>,
    /// Allowed tags per argument slot of an inline
    pub args: Vec<HashSet<String>>,
    /// Number of argument slots an inline must have
    pub arg_count: usize,
    /// Tags allowed in a block's head
    pub head: HashSet<String>,
}

impl TagRule {
    pub fn block() -> Self {
        Self {
            kind: Kind::Block,
            children: IndexMap::new(),
            args: Vec::new(),
            arg_count: 0,
            head: HashSet::new(),
        }
    }

    pub fn inline() -> Self {
        Self {
            kind: Kind::Inline,
            ..Self::block()
        }
    }

    pub fn with_child(mut self, tag: impl Into<String>, cardinality: Cardinality) -> Self {
        self.children.insert(tag.into(), cardinality);
        self
    }

    pub fn with_head<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.head.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Declare the next argument slot; arity grows with it
    pub fn with_arg<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.push(tags.into_iter().map(Into::into).collect());
        self.arg_count = self.arg_count.max(self.args.len());
        self
    }

    pub fn with_arg_count(mut self, arg_count: usize) -> Self {
        self.arg_count = arg_count;
        self
    }

    pub fn allows_child(&self, tag: &str) -> Option<Cardinality> {
        self.children.get(tag).copied()
    }

    pub fn allows_in_arg(&self, index: usize, tag: &str) -> bool {
        self.args
            .get(index)
            .is_some_and(|allowed| allowed.contains(tag))
    }

    pub fn allows_in_head(&self, tag: &str) -> bool {
        self.head.contains(tag)
    }
}

/// Runtime schema (read-only once loaded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub tags: HashMap<String, TagRule>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            description: None,
            tags: HashMap::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>, rule: TagRule) -> Self {
        self.tags.insert(tag.into(), rule);
        self
    }

    pub fn rule(&self, tag: &str) -> Option<&TagRule> {
        self.tags.get(tag)
    }

    pub fn kind_of(&self, tag: &str) -> Option<Kind> {
        self.rule(tag).map(|rule| rule.kind)
    }

    /// Cardinality of `child` under `parent`, `None` if it is not allowed there
    pub fn child_rule(&self, parent: &str, child: &str) -> Option<Cardinality> {
        self.rule(parent)?.allows_child(child)
    }

    pub fn arg_rule(&self, parent: &str, index: usize, child: &str) -> bool {
        self.rule(parent)
            .is_some_and(|rule| rule.allows_in_arg(index, child))
    }

    pub fn arg_count(&self, tag: &str) -> usize {
        self.rule(tag).map(|rule| rule.arg_count).unwrap_or(0)
    }

    pub fn head_rule(&self, parent: &str, child: &str) -> bool {
        self.rule(parent)
            .is_some_and(|rule| rule.allows_in_head(child))
    }
}
