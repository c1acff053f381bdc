//! # Core Type Definitions
//!
//! This module contains all core types for the nested-sequence engine:
//! - The recursive container (`Nest`) and its derived structures
//!   (`BoolNest`, `PathNest`, `Shape`)
//! - The combination rule for multiple criteria (`Fulfillment`)
//! - Error types (`NestError`)
//! - Bridges to and from `serde_json::Value`
//!
//! ## Shape Guarantees
//!
//! Every shape-preserving operation in this crate produces output whose
//! sub-sequence boundaries line up 1:1 with its input. Sub-sequences are
//! never dropped, only leaves.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

// =============================================================================
// NEST
// =============================================================================

/// A recursively nested sequence: either a single leaf or an ordered
/// sequence of further nests.
///
/// Operations take the top-level container as a slice (`&[Nest<T>]`),
/// mirroring how the engine always walks a sequence, never a bare leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nest<T> {
    /// A nested sub-sequence.
    Seq(Vec<Nest<T>>),
    /// A non-sequence value.
    Leaf(T),
}

impl<T> Nest<T> {
    /// Create a leaf.
    #[must_use]
    pub const fn leaf(value: T) -> Self {
        Self::Leaf(value)
    }

    /// Create a sub-sequence.
    #[must_use]
    pub const fn seq(items: Vec<Self>) -> Self {
        Self::Seq(items)
    }

    /// Check if this is a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Check if this is a sub-sequence.
    #[must_use]
    pub const fn is_seq(&self) -> bool {
        matches!(self, Self::Seq(_))
    }

    /// Borrow the leaf value, if this is a leaf.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&T> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Seq(_) => None,
        }
    }

    /// Borrow the items, if this is a sub-sequence.
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Self]> {
        match self {
            Self::Seq(items) => Some(items),
            Self::Leaf(_) => None,
        }
    }
}

/// Result of applying one criterion: a boolean nest shaped like its source.
pub type BoolNest = Vec<Nest<bool>>;

/// Location of matching leaves: every match replaced by its index within
/// its immediate container, non-matches pruned, sub-sequences kept.
pub type PathNest = Vec<Nest<usize>>;

/// The arrangement of sequence boundaries, independent of leaf values.
pub type Shape = Vec<Nest<()>>;

/// Nesting depth of a sequence.
///
/// A flat sequence (including an empty one) has depth 1; each level of
/// sub-sequence adds one. Computed with an explicit stack so that measuring
/// a pathological input cannot itself exhaust the call stack.
#[must_use]
pub fn depth<T>(items: &[Nest<T>]) -> usize {
    let mut deepest = 1;
    let mut stack: Vec<(&[Nest<T>], usize)> = vec![(items, 1)];

    while let Some((level, level_depth)) = stack.pop() {
        deepest = deepest.max(level_depth);
        for item in level {
            if let Nest::Seq(children) = item {
                stack.push((children.as_slice(), level_depth.saturating_add(1)));
            }
        }
    }

    deepest
}

// =============================================================================
// FULFILLMENT POLICY
// =============================================================================

/// How the per-criterion locations of several criteria combine into one
/// selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fulfillment {
    /// The index must be located by every criterion (intersection).
    All,
    /// The index must be located by no criterion (complement of the union).
    None,
    /// The index must be located by at least one criterion (union).
    Any,
}

impl Fulfillment {
    /// Decide whether a leaf index is admitted, given the index sets each
    /// criterion located at the same level.
    #[must_use]
    pub fn admits(self, index: usize, located: &[BTreeSet<usize>]) -> bool {
        match self {
            Self::All => located.iter().all(|set| set.contains(&index)),
            Self::None => !located.iter().any(|set| set.contains(&index)),
            Self::Any => located.iter().any(|set| set.contains(&index)),
        }
    }
}

// =============================================================================
// JSON BRIDGES
// =============================================================================

impl From<serde_json::Value> for Nest<serde_json::Value> {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(items) => Self::Seq(items.into_iter().map(Self::from).collect()),
            other => Self::Leaf(other),
        }
    }
}

impl From<Nest<serde_json::Value>> for serde_json::Value {
    fn from(nest: Nest<serde_json::Value>) -> Self {
        match nest {
            Nest::Seq(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Nest::Leaf(value) => value,
        }
    }
}

/// Convert a JSON value into a top-level sequence.
///
/// Arrays become the sequence itself; any other value becomes a one-leaf
/// sequence.
#[must_use]
pub fn from_json(value: serde_json::Value) -> Vec<Nest<serde_json::Value>> {
    match Nest::from(value) {
        Nest::Seq(items) => items,
        leaf @ Nest::Leaf(_) => vec![leaf],
    }
}

/// Convert a top-level sequence back into a JSON array.
#[must_use]
pub fn to_json(items: &[Nest<serde_json::Value>]) -> serde_json::Value {
    serde_json::Value::Array(items.iter().cloned().map(serde_json::Value::from).collect())
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the engine.
///
/// - No silent failures: a failing criterion aborts the whole call
/// - Use `Result<T, NestError>` for fallible operations
/// - The engine never panics; all errors are returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NestError {
    /// A criterion cannot be used (unknown type tag, bad pattern, empty set).
    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    /// A fallible criterion failed on a leaf.
    #[error("Criterion {criterion} failed at path {path:?}: {reason}")]
    CriterionFailed {
        criterion: usize,
        path: Vec<usize>,
        reason: String,
    },

    /// Two structures that must line up positionally do not.
    #[error("Shape mismatch: expected {expected} elements, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// The input nests deeper than the configured limit.
    #[error("Depth {depth} exceeds limit {limit}")]
    DepthExceeded { depth: usize, limit: usize },

    /// More criteria were supplied than the configured limit.
    #[error("{count} criteria exceed limit {limit}")]
    TooManyCriteria { count: usize, limit: usize },

    /// The engine configuration could not be parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred while loading configuration.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
