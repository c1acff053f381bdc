//! # Retrieve Module
//!
//! Combines per-criterion locations under a fulfillment policy and
//! reassembles the matching part of the original structure.
//!
//! Two phases:
//! 1. Locate every criterion independently (pure, no combination yet)
//! 2. Walk the source and every location level in lockstep, admitting each
//!    leaf by explicit set membership (`Fulfillment::admits`)
//!
//! Index sets are scoped to one containing sequence, so equal positions in
//! different branches never stand in for each other.

use crate::criteria::Criterion;
use crate::locate::{locate, split_level};
use crate::types::{Fulfillment, Nest, NestError};
use std::collections::BTreeSet;

/// Retrieve the leaves of `items` that satisfy `policy` across `tests`,
/// keeping relative nesting and order. Sub-sequences are always kept,
/// possibly empty.
///
/// Returns `NestError::InvalidPredicate` if `tests` is empty.
pub fn retrieve<T: Clone>(
    items: &[Nest<T>],
    tests: &[&dyn Criterion<T>],
    policy: Fulfillment,
) -> Result<Vec<Nest<T>>, NestError> {
    let (admitted, _) = partition(items, tests, policy)?;
    Ok(admitted)
}

/// Partition `items` into the leaves every criterion matches and all other
/// leaves. Both halves keep the source nesting; each leaf lands in exactly
/// one half.
pub fn split<T: Clone>(
    items: &[Nest<T>],
    tests: &[&dyn Criterion<T>],
) -> Result<(Vec<Nest<T>>, Vec<Nest<T>>), NestError> {
    partition(items, tests, Fulfillment::All)
}

fn partition<T: Clone>(
    items: &[Nest<T>],
    tests: &[&dyn Criterion<T>],
    policy: Fulfillment,
) -> Result<(Vec<Nest<T>>, Vec<Nest<T>>), NestError> {
    if tests.is_empty() {
        return Err(NestError::InvalidPredicate(
            "at least one criterion is required".to_string(),
        ));
    }

    let locations = locate(items, tests)?;
    let levels: Vec<&[Nest<usize>]> = locations.iter().map(Vec::as_slice).collect();

    Ok(select(items, &levels, policy))
}

fn select<T: Clone>(
    items: &[Nest<T>],
    levels: &[&[Nest<usize>]],
    policy: Fulfillment,
) -> (Vec<Nest<T>>, Vec<Nest<T>>) {
    let (located, branches): (Vec<BTreeSet<usize>>, Vec<Vec<&[Nest<usize>]>>) =
        levels.iter().map(|&level| split_level(level)).unzip();

    let mut admitted = Vec::new();
    let mut rejected = Vec::new();
    let mut branch = 0;

    for (index, item) in items.iter().enumerate() {
        match item {
            Nest::Seq(children) => {
                let child_levels: Vec<&[Nest<usize>]> = branches
                    .iter()
                    .map(|nested| nested.get(branch).copied().unwrap_or(&[]))
                    .collect();
                let (kept, dropped) = select(children, &child_levels, policy);
                admitted.push(Nest::Seq(kept));
                rejected.push(Nest::Seq(dropped));
                branch += 1;
            }
            Nest::Leaf(value) => {
                if policy.admits(index, &located) {
                    admitted.push(Nest::Leaf(value.clone()));
                } else {
                    rejected.push(Nest::Leaf(value.clone()));
                }
            }
        }
    }

    (admitted, rejected)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::predicate;

    fn sample() -> Vec<Nest<i64>> {
        vec![
            Nest::leaf(1),
            Nest::leaf(6),
            Nest::seq(vec![Nest::leaf(2), Nest::leaf(9), Nest::seq(vec![Nest::leaf(12)])]),
            Nest::leaf(3),
        ]
    }

    #[test]
    fn retrieve_all_intersects() {
        let even = predicate(|x: &i64| x % 2 == 0);
        let triple = predicate(|x: &i64| x % 3 == 0);

        let result = retrieve(&sample(), &[&even, &triple], Fulfillment::All).expect("retrieve");

        assert_eq!(
            result,
            vec![
                Nest::leaf(6),
                Nest::seq(vec![Nest::seq(vec![Nest::leaf(12)])]),
            ]
        );
    }

    #[test]
    fn retrieve_any_unions() {
        let even = predicate(|x: &i64| x % 2 == 0);
        let triple = predicate(|x: &i64| x % 3 == 0);

        let result = retrieve(&sample(), &[&even, &triple], Fulfillment::Any).expect("retrieve");

        assert_eq!(
            result,
            vec![
                Nest::leaf(6),
                Nest::seq(vec![Nest::leaf(2), Nest::leaf(9), Nest::seq(vec![Nest::leaf(12)])]),
                Nest::leaf(3),
            ]
        );
    }

    #[test]
    fn retrieve_none_excludes_every_match() {
        let even = predicate(|x: &i64| x % 2 == 0);
        let triple = predicate(|x: &i64| x % 3 == 0);

        let result = retrieve(&sample(), &[&even, &triple], Fulfillment::None).expect("retrieve");

        assert_eq!(
            result,
            vec![Nest::leaf(1), Nest::seq(vec![Nest::seq(vec![])])]
        );
    }

    #[test]
    fn indices_do_not_leak_across_branches() {
        // "b" sits at index 1 of the branch; index 1 of the top level is a
        // number and must not be retrieved because of it.
        let input = vec![
            Nest::leaf("a"),
            Nest::leaf("1"),
            Nest::seq(vec![Nest::leaf("2"), Nest::leaf("b")]),
        ];
        let alphabetic = predicate(|x: &&str| x.chars().all(char::is_alphabetic));

        let result = retrieve(&input, &[&alphabetic], Fulfillment::All).expect("retrieve");

        assert_eq!(
            result,
            vec![Nest::leaf("a"), Nest::seq(vec![Nest::leaf("b")])]
        );
    }

    #[test]
    fn retrieve_rejects_empty_criteria() {
        let result = retrieve::<i64>(&sample(), &[], Fulfillment::All);
        assert!(matches!(result, Err(NestError::InvalidPredicate(_))));
    }

    #[test]
    fn split_partitions_every_leaf() {
        let even = predicate(|x: &i64| x % 2 == 0);
        let (matching, rest) = split(&sample(), &[&even]).expect("split");

        assert_eq!(
            matching,
            vec![
                Nest::leaf(6),
                Nest::seq(vec![Nest::leaf(2), Nest::seq(vec![Nest::leaf(12)])]),
            ]
        );
        assert_eq!(
            rest,
            vec![
                Nest::leaf(1),
                Nest::seq(vec![Nest::leaf(9), Nest::seq(vec![])]),
                Nest::leaf(3),
            ]
        );
    }
}
