//! # Locate Module
//!
//! Converts boolean nests into index locations.
//!
//! A location keeps the nesting of its source: each matching leaf becomes
//! its index within its immediate container, non-matching leaves are
//! pruned, and every sub-sequence survives (empty when nothing in the
//! branch matched). The k-th sub-sequence of a location level therefore
//! always corresponds to the k-th sub-sequence of the source level.

use crate::criteria::{Criterion, criteria};
use crate::deep::deep_filter_map;
use crate::types::{Nest, NestError, PathNest};
use std::collections::BTreeSet;

/// Locate the leaves each criterion matches, one location per criterion.
pub fn locate<T>(
    items: &[Nest<T>],
    tests: &[&dyn Criterion<T>],
) -> Result<Vec<PathNest>, NestError> {
    let truths = criteria(items, tests)?;
    Ok(truths
        .iter()
        .map(|truth| deep_filter_map(truth, |matched, index, _| matched.then_some(index)))
        .collect())
}

/// Locate matching leaves of the top level only.
///
/// Nested sub-sequences are stripped from the result, leaving one flat
/// group of top-level indices per criterion.
pub fn locate_surface<T>(
    items: &[Nest<T>],
    tests: &[&dyn Criterion<T>],
) -> Result<Vec<Vec<usize>>, NestError> {
    Ok(locate(items, tests)?
        .iter()
        .map(|location| location.iter().filter_map(|item| item.as_leaf().copied()).collect())
        .collect())
}

/// Collect every index in the given locations, deduplicated, in first-seen
/// order. Within a location each level's own indices come before those of
/// its branches.
#[must_use]
pub fn flatten(locations: &[PathNest]) -> Vec<usize> {
    let mut seen = BTreeSet::new();
    let mut flat = Vec::new();

    for location in locations {
        let mut stack: Vec<&[Nest<usize>]> = vec![location];
        while let Some(level) = stack.pop() {
            // Push sub-sequences in reverse so they pop in source order.
            let mut children = Vec::new();
            for item in level {
                match item {
                    Nest::Leaf(index) => {
                        if seen.insert(*index) {
                            flat.push(*index);
                        }
                    }
                    Nest::Seq(nested) => children.push(nested.as_slice()),
                }
            }
            stack.extend(children.into_iter().rev());
        }
    }

    flat
}

/// Split one location level into the indices located directly in it and
/// its sub-sequences, in order.
pub(crate) fn split_level(level: &[Nest<usize>]) -> (BTreeSet<usize>, Vec<&[Nest<usize>]>) {
    let mut indices = BTreeSet::new();
    let mut branches = Vec::new();

    for item in level {
        match item {
            Nest::Leaf(index) => {
                indices.insert(*index);
            }
            Nest::Seq(nested) => branches.push(nested.as_slice()),
        }
    }

    (indices, branches)
}

// =============================================================================
// TESTS
// =============================================================================
