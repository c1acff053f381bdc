//! # Structure Module
//!
//! Structural utilities that flatten, search, or normalize nests without
//! evaluating criteria.

use crate::types::Nest;

/// Every leaf, depth-first, duplicates kept.
#[must_use]
pub fn extract<T>(items: &[Nest<T>]) -> Vec<&T> {
    let mut leaves = Vec::new();
    collect_leaves(items, &mut leaves);
    leaves
}

fn collect_leaves<'a, T>(items: &'a [Nest<T>], leaves: &mut Vec<&'a T>) {
    for item in items {
        match item {
            Nest::Leaf(value) => leaves.push(value),
            Nest::Seq(children) => collect_leaves(children, leaves),
        }
    }
}

/// Every distinct leaf, depth-first, keeping the first occurrence.
#[must_use]
pub fn clean<T: PartialEq>(items: &[Nest<T>]) -> Vec<&T> {
    let mut distinct: Vec<&T> = Vec::new();
    for leaf in extract(items) {
        if !distinct.contains(&leaf) {
            distinct.push(leaf);
        }
    }
    distinct
}

/// Every sub-sequence at any depth, in pre-order. The top level itself is
/// not included.
#[must_use]
pub fn extract_arrays<T>(items: &[Nest<T>]) -> Vec<&[Nest<T>]> {
    let mut arrays = Vec::new();
    collect_arrays(items, &mut arrays);
    arrays
}

fn collect_arrays<'a, T>(items: &'a [Nest<T>], arrays: &mut Vec<&'a [Nest<T>]>) {
    for item in items {
        if let Nest::Seq(children) = item {
            arrays.push(children);
            collect_arrays(children, arrays);
        }
    }
}

/// Whether `needle` occurs as a leaf anywhere inside `items`.
#[must_use]
pub fn contains<T: PartialEq>(items: &[Nest<T>], needle: &T) -> bool {
    items.iter().any(|item| match item {
        Nest::Leaf(value) => value == needle,
        Nest::Seq(children) => contains(children, needle),
    })
}

/// Sub-sequences (at any depth) that contain `needle` anywhere inside.
#[must_use]
pub fn branches_with<'a, T: PartialEq>(items: &'a [Nest<T>], needle: &T) -> Vec<&'a [Nest<T>]> {
    extract_arrays(items)
        .into_iter()
        .filter(|branch| contains(branch, needle))
        .collect()
}

/// Whether every needle occurs somewhere inside `items`.
#[must_use]
pub fn all_include<T: PartialEq>(items: &[Nest<T>], needles: &[T]) -> bool {
    needles.iter().all(|needle| contains(items, needle))
}

/// Whether no needle occurs anywhere inside `items`.
#[must_use]
pub fn none_include<T: PartialEq>(items: &[Nest<T>], needles: &[T]) -> bool {
    !needles.iter().any(|needle| contains(items, needle))
}

/// Normalize to the doubly-nested shape used for groups of locations.
///
/// A non-empty sequence made only of sub-sequences is already wrapped and
/// is returned unchanged; anything else becomes the single sub-sequence of
/// a new top level.
#[must_use]
pub fn wrap<T>(items: Vec<Nest<T>>) -> Vec<Nest<T>> {
    if !items.is_empty() && items.iter().all(Nest::is_seq) {
        items
    } else {
        vec![Nest::Seq(items)]
    }
}

// =============================================================================
// TESTS
// =============================================================================
