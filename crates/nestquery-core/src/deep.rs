//! # Deep Module
//!
//! Shape-preserving recursive primitives. Every other operation in the
//! crate composes through these.
//!
//! - `deep_map`: transform every leaf, keep every sequence boundary
//! - `deep_filter`: drop leaves, keep every sequence boundary
//! - `deep_filter_map`: transform and drop in one pass
//!
//! Leaf callbacks receive `(value, index, container)` where `index` is the
//! leaf's position within its immediate container.

use crate::types::{Nest, Shape};

// =============================================================================
// DEEP MAP
// =============================================================================

/// Apply `f` to every leaf, preserving arity and order at every level.
pub fn deep_map<T, U, F>(items: &[Nest<T>], mut f: F) -> Vec<Nest<U>>
where
    F: FnMut(&T, usize, &[Nest<T>]) -> U,
{
    map_level(items, &mut f)
}

fn map_level<T, U, F>(items: &[Nest<T>], f: &mut F) -> Vec<Nest<U>>
where
    F: FnMut(&T, usize, &[Nest<T>]) -> U,
{
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Nest::Seq(children) => Nest::Seq(map_level(children, f)),
            Nest::Leaf(value) => Nest::Leaf(f(value, index, items)),
        })
        .collect()
}

/// Fallible `deep_map`: the first error returned by `f` aborts the walk.
pub fn try_deep_map<T, U, E, F>(items: &[Nest<T>], mut f: F) -> Result<Vec<Nest<U>>, E>
where
    F: FnMut(&T, usize, &[Nest<T>]) -> Result<U, E>,
{
    try_deep_map_with_path(items, |value, path, container| {
        f(value, path.last().copied().unwrap_or_default(), container)
    })
}

/// Fallible `deep_map` whose callback receives the full positional path of
/// the leaf (indices from the top level down) instead of its local index.
pub fn try_deep_map_with_path<T, U, E, F>(
    items: &[Nest<T>],
    mut f: F,
) -> Result<Vec<Nest<U>>, E>
where
    F: FnMut(&T, &[usize], &[Nest<T>]) -> Result<U, E>,
{
    let mut path = Vec::new();
    try_map_level(items, &mut path, &mut f)
}

fn try_map_level<T, U, E, F>(
    items: &[Nest<T>],
    path: &mut Vec<usize>,
    f: &mut F,
) -> Result<Vec<Nest<U>>, E>
where
    F: FnMut(&T, &[usize], &[Nest<T>]) -> Result<U, E>,
{
    let mut mapped = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        path.push(index);
        let result = match item {
            Nest::Seq(children) => try_map_level(children, path, f).map(Nest::Seq),
            Nest::Leaf(value) => f(value, path, items).map(Nest::Leaf),
        };
        path.pop();
        mapped.push(result?);
    }

    Ok(mapped)
}

/// The shape of a sequence: every leaf replaced by `()`.
#[must_use]
pub fn shape<T>(items: &[Nest<T>]) -> Shape {
    deep_map(items, |_, _, _| ())
}

// =============================================================================
// DEEP FILTER
// =============================================================================

/// Remove leaves that fail `predicate` at every level.
///
/// Children are filtered before their own level: the predicate sees each
/// leaf's index in the current level and a container whose sub-sequences
/// are already filtered. Sub-sequences are always retained, including those
/// left empty, so `[1, [3, 5]]` filtered for even leaves is `[[]]`.
pub fn deep_filter<T, F>(items: &[Nest<T>], mut predicate: F) -> Vec<Nest<T>>
where
    T: Clone,
    F: FnMut(&T, usize, &[Nest<T>]) -> bool,
{
    filter_level(items, &mut predicate)
}

fn filter_level<T, F>(items: &[Nest<T>], predicate: &mut F) -> Vec<Nest<T>>
where
    T: Clone,
    F: FnMut(&T, usize, &[Nest<T>]) -> bool,
{
    let level: Vec<Nest<T>> = items
        .iter()
        .map(|item| match item {
            Nest::Seq(children) => Nest::Seq(filter_level(children, predicate)),
            Nest::Leaf(value) => Nest::Leaf(value.clone()),
        })
        .collect();

    let keep: Vec<bool> = level
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Nest::Seq(_) => true,
            Nest::Leaf(value) => predicate(value, index, &level),
        })
        .collect();

    level
        .into_iter()
        .zip(keep)
        .filter_map(|(item, kept)| kept.then_some(item))
        .collect()
}

/// Map every leaf to an `Option`, dropping `None` leaves and keeping every
/// sub-sequence.
pub fn deep_filter_map<T, U, F>(items: &[Nest<T>], mut f: F) -> Vec<Nest<U>>
where
    F: FnMut(&T, usize, &[Nest<T>]) -> Option<U>,
{
    filter_map_level(items, &mut f)
}

fn filter_map_level<T, U, F>(items: &[Nest<T>], f: &mut F) -> Vec<Nest<U>>
where
    F: FnMut(&T, usize, &[Nest<T>]) -> Option<U>,
{
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Nest::Seq(children) => Some(Nest::Seq(filter_map_level(children, f))),
            Nest::Leaf(value) => f(value, index, items).map(Nest::Leaf),
        })
        .collect()
}

// =============================================================================
// COMPOSED MAPS
// =============================================================================

/// Replace every element (leaf or sub-sequence) that matches `pattern` with
/// the result of `f`. Non-matching sub-sequences are recursed into;
/// non-matching leaves are kept unchanged.
pub fn pattern_map<T, P, F>(items: &[Nest<T>], mut f: F, mut pattern: P) -> Vec<Nest<T>>
where
    T: Clone,
    P: FnMut(&Nest<T>) -> bool,
    F: FnMut(&Nest<T>, usize, &[Nest<T>]) -> Nest<T>,
{
    pattern_level(items, &mut f, &mut pattern)
}

fn pattern_level<T, P, F>(items: &[Nest<T>], f: &mut F, pattern: &mut P) -> Vec<Nest<T>>
where
    T: Clone,
    P: FnMut(&Nest<T>) -> bool,
    F: FnMut(&Nest<T>, usize, &[Nest<T>]) -> Nest<T>,
{
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if pattern(item) {
                return f(item, index, items);
            }
            match item {
                Nest::Seq(children) => Nest::Seq(pattern_level(children, f, pattern)),
                Nest::Leaf(_) => item.clone(),
            }
        })
        .collect()
}

/// Apply each transform in turn; transform `n + 1` sees the output of
/// transform `n`. An empty list returns a copy of the input.
pub fn sequence_map<T, F>(items: &[Nest<T>], transforms: &mut [F]) -> Vec<Nest<T>>
where
    T: Clone,
    F: FnMut(&T, usize, &[Nest<T>]) -> T,
{
    transforms
        .iter_mut()
        .fold(items.to_vec(), |current, transform| {
            map_level(&current, transform)
        })
}

/// Apply each transform separately to the original input, producing one
/// mapped nest per transform, in transform order.
pub fn delimit_map<T, U, F>(items: &[Nest<T>], transforms: &mut [F]) -> Vec<Vec<Nest<U>>>
where
    F: FnMut(&T, usize, &[Nest<T>]) -> U,
{
    transforms
        .iter_mut()
        .map(|transform| map_level(items, transform))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Nest<i64>> {
        vec![
            Nest::leaf(1),
            Nest::seq(vec![Nest::leaf(2), Nest::leaf(3)]),
            Nest::leaf(4),
        ]
    }

    #[test]
    fn deep_map_preserves_shape() {
        let input = sample();
        let doubled = deep_map(&input, |x, _, _| x * 2);

        assert_eq!(
            doubled,
            vec![
                Nest::leaf(2),
                Nest::seq(vec![Nest::leaf(4), Nest::leaf(6)]),
                Nest::leaf(8),
            ]
        );
        assert_eq!(shape(&doubled), shape(&input));
    }

    #[test]
    fn deep_map_passes_local_index_and_container() {
        let input = sample();
        let indexed = deep_map(&input, |_, index, container| (index, container.len()));

        assert_eq!(
            indexed,
            vec![
                Nest::leaf((0, 3)),
                Nest::seq(vec![Nest::leaf((0, 2)), Nest::leaf((1, 2))]),
                Nest::leaf((2, 3)),
            ]
        );
    }

    #[test]
    fn try_deep_map_stops_at_first_error() {
        let input = sample();
        let mut visited = 0;
        let result: Result<Vec<Nest<i64>>, String> = try_deep_map(&input, |x, _, _| {
            visited += 1;
            if *x == 2 { Err("two".to_string()) } else { Ok(*x) }
        });

        assert_eq!(result, Err("two".to_string()));
        assert_eq!(visited, 2);
    }

    #[test]
    fn try_deep_map_with_path_reports_full_path() {
        let input = sample();
        let paths: Result<Vec<Nest<Vec<usize>>>, ()> =
            try_deep_map_with_path(&input, |_, path, _| Ok(path.to_vec()));

        assert_eq!(
            paths,
            Ok(vec![
                Nest::leaf(vec![0]),
                Nest::seq(vec![Nest::leaf(vec![1, 0]), Nest::leaf(vec![1, 1])]),
                Nest::leaf(vec![2]),
            ])
        );
    }

    #[test]
    fn deep_filter_keeps_emptied_sequences() {
        let input = vec![Nest::leaf(1), Nest::seq(vec![Nest::leaf(3), Nest::leaf(5)])];
        let evens = deep_filter(&input, |x: &i64, _, _| x % 2 == 0);

        assert_eq!(evens, vec![Nest::seq(vec![])]);
    }

    #[test]
    fn deep_filter_removes_at_every_level() {
        let evens = deep_filter(&sample(), |x: &i64, _, _| x % 2 == 0);
        assert_eq!(evens, vec![Nest::seq(vec![Nest::leaf(2)]), Nest::leaf(4)]);
    }

    #[test]
    fn deep_filter_sees_filtered_children() {
        let input = vec![
            Nest::seq(vec![Nest::leaf(1), Nest::leaf(2)]),
            Nest::leaf(10),
        ];
        let mut seen = Vec::new();
        let _ = deep_filter(&input, |x: &i64, _, container| {
            if *x == 10 {
                seen = container.to_vec();
            }
            x % 2 == 0
        });

        assert_eq!(seen, vec![Nest::seq(vec![Nest::leaf(2)]), Nest::leaf(10)]);
    }

    #[test]
    fn deep_filter_does_not_touch_input() {
        let input = sample();
        let before = input.clone();
        let _ = deep_filter(&input, |_, _, _| false);
        assert_eq!(input, before);
    }

    #[test]
    fn deep_filter_map_compacts() {
        let input = sample();
        let odd_positions = deep_filter_map(&input, |x, index, _| (x % 2 == 1).then_some(index));

        assert_eq!(odd_positions, vec![Nest::leaf(0), Nest::seq(vec![Nest::leaf(1)])]);
    }

    #[test]
    fn pattern_map_replaces_matching_elements() {
        let input = vec![
            Nest::leaf(1),
            Nest::seq(vec![Nest::leaf(2), Nest::seq(vec![Nest::leaf(3)])]),
        ];
        let collapsed = pattern_map(
            &input,
            |_, _, _| Nest::leaf(0),
            |item| matches!(item, Nest::Seq(children) if children.iter().all(Nest::is_leaf)),
        );

        assert_eq!(
            collapsed,
            vec![Nest::leaf(1), Nest::seq(vec![Nest::leaf(2), Nest::leaf(0)])]
        );
    }

    #[test]
    fn sequence_map_applies_in_order() {
        fn add_one(x: &i64, _: usize, _: &[Nest<i64>]) -> i64 {
            x + 1
        }
        fn times_ten(x: &i64, _: usize, _: &[Nest<i64>]) -> i64 {
            x * 10
        }

        let mut transforms: [fn(&i64, usize, &[Nest<i64>]) -> i64; 2] = [add_one, times_ten];
        let result = sequence_map(&sample(), &mut transforms);

        assert_eq!(
            result,
            vec![
                Nest::leaf(20),
                Nest::seq(vec![Nest::leaf(30), Nest::leaf(40)]),
                Nest::leaf(50),
            ]
        );
    }

    #[test]
    fn sequence_map_without_transforms_is_identity() {
        let mut transforms: Vec<fn(&i64, usize, &[Nest<i64>]) -> i64> = Vec::new();
        assert_eq!(sequence_map(&sample(), &mut transforms), sample());
    }

    #[test]
    fn delimit_map_applies_separately() {
        fn above_two(x: &i64, _: usize, _: &[Nest<i64>]) -> bool {
            *x > 2
        }
        fn below_two(x: &i64, _: usize, _: &[Nest<i64>]) -> bool {
            *x < 2
        }

        let mut transforms: [fn(&i64, usize, &[Nest<i64>]) -> bool; 2] = [above_two, below_two];
        let results = delimit_map(&sample(), &mut transforms);

        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0],
            vec![
                Nest::leaf(false),
                Nest::seq(vec![Nest::leaf(false), Nest::leaf(true)]),
                Nest::leaf(true),
            ]
        );
        assert_eq!(
            results[1],
            vec![
                Nest::leaf(true),
                Nest::seq(vec![Nest::leaf(false), Nest::leaf(false)]),
                Nest::leaf(false),
            ]
        );
    }
}
