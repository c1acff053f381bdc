//! # Logic Module
//!
//! Positional boolean combinators.
//!
//! Every two-input combinator requires equal cardinality and reports
//! `NestError::ShapeMismatch` otherwise; nothing is truncated to the
//! shorter input.

use crate::deep::deep_map;
use crate::types::{BoolNest, Nest, NestError};

/// How two boolean nests combine leaf by leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    #[must_use]
    pub const fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Self::And => left && right,
            Self::Or => left || right,
        }
    }
}

/// Positional AND of two flat boolean sequences.
pub fn and_map(left: &[bool], right: &[bool]) -> Result<Vec<bool>, NestError> {
    zip_flat(left, right, Combinator::And)
}

/// Positional OR of two flat boolean sequences.
pub fn or_map(left: &[bool], right: &[bool]) -> Result<Vec<bool>, NestError> {
    zip_flat(left, right, Combinator::Or)
}

fn zip_flat(left: &[bool], right: &[bool], op: Combinator) -> Result<Vec<bool>, NestError> {
    ensure_same_len(left.len(), right.len())?;
    Ok(left
        .iter()
        .zip(right)
        .map(|(l, r)| op.apply(*l, *r))
        .collect())
}

/// AND across a flat sequence. Empty is `true`.
#[must_use]
pub fn and_fold(values: &[bool]) -> bool {
    values.iter().all(|value| *value)
}

/// OR across a flat sequence. Empty is `false`.
#[must_use]
pub fn or_fold(values: &[bool]) -> bool {
    values.iter().any(|value| *value)
}

/// Deep NOT.
#[must_use]
pub fn negate(truth: &[Nest<bool>]) -> BoolNest {
    deep_map(truth, |value, _, _| !value)
}

/// Combine two boolean nests leaf by leaf.
///
/// Both nests must have the same shape: equal length at every level and a
/// sub-sequence wherever the other has one.
pub fn zip_nest(
    left: &[Nest<bool>],
    right: &[Nest<bool>],
    op: Combinator,
) -> Result<BoolNest, NestError> {
    ensure_same_len(left.len(), right.len())?;

    left.iter()
        .zip(right)
        .map(|pair| match pair {
            (Nest::Leaf(l), Nest::Leaf(r)) => Ok(Nest::Leaf(op.apply(*l, *r))),
            (Nest::Seq(l), Nest::Seq(r)) => zip_nest(l, r, op).map(Nest::Seq),
            (Nest::Seq(l), Nest::Leaf(_)) => Err(NestError::ShapeMismatch {
                expected: l.len(),
                found: 1,
            }),
            (Nest::Leaf(_), Nest::Seq(r)) => Err(NestError::ShapeMismatch {
                expected: 1,
                found: r.len(),
            }),
        })
        .collect()
}

/// Fold several boolean nests into one with `op`. No input gives an empty
/// nest.
pub fn collapse(truths: &[BoolNest], op: Combinator) -> Result<BoolNest, NestError> {
    let Some((first, rest)) = truths.split_first() else {
        return Ok(Vec::new());
    };

    rest.iter()
        .try_fold(first.clone(), |acc, next| zip_nest(&acc, next, op))
}

fn ensure_same_len(expected: usize, found: usize) -> Result<(), NestError> {
    if expected != found {
        return Err(NestError::ShapeMismatch { expected, found });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
