//! # Criteria Module
//!
//! The `Criterion` contract and the evaluator that turns a set of criteria
//! into parallel boolean nests.
//!
//! - A criterion tests one leaf given its index and immediate container
//! - Results are strict booleans; there is no truthy/falsy coercion
//! - Output order matches criterion order; later stages zip positionally

use crate::deep::try_deep_map_with_path;
use crate::logic::negate;
use crate::types::{BoolNest, Nest, NestError};

// =============================================================================
// CRITERION TRAIT
// =============================================================================

/// A side-effect-free test applied to a leaf with positional context.
///
/// Criteria may be evaluated several times against the same leaf, so
/// implementations must be pure for results to be predictable.
pub trait Criterion<T> {
    /// Test `value`, found at `index` within `container`.
    ///
    /// An `Err` aborts the whole evaluation that invoked this criterion.
    fn test(&self, value: &T, index: usize, container: &[Nest<T>]) -> Result<bool, NestError>;
}

/// Criterion backed by a three-argument closure. See [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnCriterion<F>(F);

impl<T, F> Criterion<T> for FnCriterion<F>
where
    F: Fn(&T, usize, &[Nest<T>]) -> bool,
{
    fn test(&self, value: &T, index: usize, container: &[Nest<T>]) -> Result<bool, NestError> {
        Ok((self.0)(value, index, container))
    }
}

/// Criterion backed by a closure that only looks at the value. See [`predicate`].
#[derive(Debug, Clone, Copy)]
pub struct Predicate<F>(F);

impl<T, F> Criterion<T> for Predicate<F>
where
    F: Fn(&T) -> bool,
{
    fn test(&self, value: &T, _index: usize, _container: &[Nest<T>]) -> Result<bool, NestError> {
        Ok((self.0)(value))
    }
}

/// Criterion backed by a closure that can fail. See [`fallible`].
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(F);

impl<T, F> Criterion<T> for Fallible<F>
where
    F: Fn(&T, usize, &[Nest<T>]) -> Result<bool, NestError>,
{
    fn test(&self, value: &T, index: usize, container: &[Nest<T>]) -> Result<bool, NestError> {
        (self.0)(value, index, container)
    }
}

/// Adapt a `(value, index, container)` closure into a criterion.
pub fn from_fn<T, F>(f: F) -> FnCriterion<F>
where
    F: Fn(&T, usize, &[Nest<T>]) -> bool,
{
    FnCriterion(f)
}

/// Adapt a value-only closure into a criterion.
pub fn predicate<T, F>(f: F) -> Predicate<F>
where
    F: Fn(&T) -> bool,
{
    Predicate(f)
}

/// Adapt a fallible `(value, index, container)` closure into a criterion.
pub fn fallible<T, F>(f: F) -> Fallible<F>
where
    F: Fn(&T, usize, &[Nest<T>]) -> Result<bool, NestError>,
{
    Fallible(f)
}

// =============================================================================
// EVALUATOR
// =============================================================================

/// Evaluate a single criterion against every leaf.
pub fn criterion<T>(items: &[Nest<T>], test: &dyn Criterion<T>) -> Result<BoolNest, NestError> {
    evaluate(items, 0, test)
}

/// Evaluate each criterion against every leaf, producing one boolean nest
/// per criterion in criterion order.
///
/// The first failing criterion aborts the call with
/// `NestError::CriterionFailed`, naming the criterion's position and the
/// leaf's full path.
pub fn criteria<T>(
    items: &[Nest<T>],
    tests: &[&dyn Criterion<T>],
) -> Result<Vec<BoolNest>, NestError> {
    tests
        .iter()
        .enumerate()
        .map(|(position, test)| evaluate(items, position, *test))
        .collect()
}

/// The negation of a single criterion's boolean nest.
pub fn not<T>(items: &[Nest<T>], test: &dyn Criterion<T>) -> Result<BoolNest, NestError> {
    let truth = criterion(items, test)?;
    Ok(negate(&truth))
}

fn evaluate<T>(
    items: &[Nest<T>],
    position: usize,
    test: &dyn Criterion<T>,
) -> Result<BoolNest, NestError> {
    try_deep_map_with_path(items, |value, path, container| {
        let index = path.last().copied().unwrap_or_default();
        test.test(value, index, container)
            .map_err(|e| NestError::CriterionFailed {
                criterion: position,
                path: path.to_vec(),
                reason: e.to_string(),
            })
    })
}

// =============================================================================
// TESTS
// =============================================================================
