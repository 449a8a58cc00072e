//! Validation Engine
//!
//! Depth-first walk of a document tree against a schema. Every check is
//! independent: problems are collected into the result, never raised, and
//! only an unknown tag stops descent into its subtree.

use crate::diagnostics::{Diagnostic, ValidationError};
use crate::schema::{Kind, Schema, TagRule};
use crate::tree::{BlockElement, InlineElement, Node};

use super::cardinality::check_children;

/// Result of validating a tree, errors in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add_error(&mut self, error: ValidationError) {
        log::trace!("HM{}: {}", error.code(), error);
        self.errors.push(error);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn codes(&self) -> Vec<u16> {
        self.errors.iter().map(ValidationError::code).collect()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(Diagnostic::from).collect()
    }
}

/// Argument slot of an inline parent that a node sits in
#[derive(Debug, Clone, Copy)]
struct ArgSlot<'a> {
    parent: &'a str,
    rule: &'a TagRule,
    index: usize,
}

/// Validate a whole document tree
pub fn validate(root: &Node, schema: &Schema) -> ValidationResult {
    log::debug!(
        "Validating tree rooted at '#{}' against schema '{}'",
        root.tag(),
        schema.name
    );

    let mut result = ValidationResult::new();
    validate_node(root, schema, &mut result);

    log::debug!("Validation found {} error(s)", result.len());
    result
}

/// Validate a block element as a tree root
pub fn validate_block(block: &BlockElement, schema: &Schema) -> ValidationResult {
    let mut result = ValidationResult::new();
    visit_block(block, schema, &mut result);
    result
}

/// Validate an inline element outside of any argument slot
pub fn validate_inline(inline: &InlineElement, schema: &Schema) -> ValidationResult {
    let mut result = ValidationResult::new();
    visit_inline(inline, None, schema, &mut result);
    result
}

fn validate_node(node: &Node, schema: &Schema, result: &mut ValidationResult) {
    match node {
        Node::Block(block) => visit_block(block, schema, result),
        Node::Inline(inline) => visit_inline(inline, None, schema, result),
    }
}

fn visit_block(block: &BlockElement, schema: &Schema, result: &mut ValidationResult) {
    let Some(rule) = schema.rule(&block.tag) else {
        result.add_error(ValidationError::UnknownTag {
            tag: block.tag.clone(),
        });
        return;
    };

    if rule.kind == Kind::Inline {
        result.add_error(ValidationError::InlineUsedAsBlock {
            tag: block.tag.clone(),
        });

        // The inline rule says nothing about heads or children, so only the
        // nodes themselves are checked
        for head in &block.head {
            visit_inline(head, None, schema, result);
        }
        for child in &block.children {
            validate_node(child, schema, result);
        }
        return;
    }

    for head in &block.head {
        if schema.rule(&head.tag).is_some() && !rule.allows_in_head(&head.tag) {
            result.add_error(ValidationError::DisallowedInHead {
                parent: block.tag.clone(),
                tag: head.tag.clone(),
            });
        }
        visit_inline(head, None, schema, result);
    }

    for child in &block.children {
        let tag = child.tag();
        let Some(child_kind) = schema.kind_of(tag) else {
            validate_node(child, schema, result);
            continue;
        };

        if rule.allows_child(tag).is_none() {
            result.add_error(ValidationError::DisallowedInBlock {
                parent: block.tag.clone(),
                tag: tag.to_string(),
            });
        }
        // Inline content has no place in a child list. A block-declared tag
        // gets its mismatch from the inline visit instead.
        if child.kind() == Kind::Inline && child_kind == Kind::Inline {
            result.add_error(ValidationError::BlockUsedAsInline {
                tag: tag.to_string(),
            });
        }
        validate_node(child, schema, result);
    }

    for error in check_children(block, rule) {
        result.add_error(error);
    }
}

fn visit_inline(
    inline: &InlineElement,
    slot: Option<ArgSlot<'_>>,
    schema: &Schema,
    result: &mut ValidationResult,
) {
    let Some(rule) = schema.rule(&inline.tag) else {
        result.add_error(ValidationError::UnknownTag {
            tag: inline.tag.clone(),
        });
        return;
    };

    let mismatched = rule.kind == Kind::Block;
    if mismatched {
        result.add_error(ValidationError::BlockUsedAsInline {
            tag: inline.tag.clone(),
        });
    }

    // Undeclared slots allow nothing
    if let Some(slot) = slot {
        if !slot.rule.allows_in_arg(slot.index, &inline.tag) {
            result.add_error(ValidationError::DisallowedInArg {
                parent: slot.parent.to_string(),
                index: slot.index,
                tag: inline.tag.clone(),
            });
        }
    }

    if !mismatched && inline.args.len() != rule.arg_count {
        result.add_error(ValidationError::ArgumentCount {
            tag: inline.tag.clone(),
            expected: rule.arg_count,
            actual: inline.args.len(),
        });
    }

    for (index, content) in inline.args.iter().enumerate() {
        let slot = (!mismatched).then_some(ArgSlot {
            parent: &inline.tag,
            rule,
            index,
        });
        for node in content {
            visit_inline(node, slot, schema, result);
        }
    }
}
