//! Presentation helpers for diagnostic messages.

use crate::schema::Constraint;

/// English ordinal for a 1-based position: 1st, 2nd, 3rd, 4th, 11th, 21st...
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Ordinal of a 0-based argument slot
pub fn argument_position(index: &usize) -> String {
    ordinal(index + 1)
}

/// How a violated cardinality is phrased in messages
pub fn requirement(constraint: &Constraint) -> String {
    let text = match constraint {
        Constraint::One => "exactly one",
        Constraint::OneOrMore => "one or more",
        Constraint::Optional => "zero or one",
    };
    format!("{text} ('#{}')", constraint.name())
}
