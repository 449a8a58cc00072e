//! Cardinality Evaluator
//!
//! Pure checks of observed child counts against declared cardinalities.

use indexmap::IndexMap;

use crate::diagnostics::ValidationError;
use crate::schema::{Constraint, TagRule};
use crate::tree::{BlockElement, Node};

/// Check one child tag's count under `parent`
pub fn check_cardinality(
    parent: &BlockElement,
    tag: &str,
    count: usize,
    constraint: Constraint,
) -> Option<ValidationError> {
    if constraint.admits(count) {
        return None;
    }

    Some(ValidationError::Cardinality {
        parent: parent.tag.clone(),
        children: parent
            .children
            .iter()
            .map(|child| child.tag().to_string())
            .collect(),
        tag: tag.to_string(),
        count,
        cardinality: constraint,
    })
}

/// Occurrences per child tag, in first-seen order
pub fn count_children(children: &[Node]) -> IndexMap<&str, usize> {
    let mut counts = IndexMap::new();
    for child in children {
        *counts.entry(child.tag()).or_insert(0) += 1;
    }
    counts
}

/// Evaluate every cardinality `rule` declares for the children of `parent`.
///
/// Observed tags come first, in first-seen order, followed by declared tags
/// that never occur, in declaration order. Tags the rule does not name are
/// placement errors and are skipped here.
pub fn check_children(parent: &BlockElement, rule: &TagRule) -> Vec<ValidationError> {
    let counts = count_children(&parent.children);

    let observed = counts
        .iter()
        .filter_map(|(tag, count)| Some((*tag, *count, rule.allows_child(tag)?)));
    let absent = rule
        .children
        .iter()
        .filter(|(tag, _)| !counts.contains_key(tag.as_str()))
        .map(|(tag, cardinality)| (tag.as_str(), 0, *cardinality));

    observed
        .chain(absent)
        .filter_map(|(tag, count, cardinality)| {
            check_cardinality(parent, tag, count, cardinality.constraint()?)
        })
        .collect()
}
