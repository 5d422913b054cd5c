//! Linear-time bulk loader.
//!
//! The root is the middlemost entry. Building it requires the whole left
//! subtree first, so the source is consumed strictly in order while the
//! recursion walks index ranges `[lo, hi]` it never materialises. Nodes on
//! the one partially filled bottom level are red, every other node is black.

use std::cmp::Ordering;

use crate::compare::{check_key, order, Comparator};
use crate::error::{Result, TreeMapError};
use crate::node::{Color, NodeStore};

/// Depth at which nodes are colored red for a tree of `len` nodes built by
/// [`build_from_sorted`].
pub fn red_level(len: usize) -> usize {
    let mut level = 0;
    let mut m = len as isize - 1;
    while m >= 0 {
        level += 1;
        m = m / 2 - 1;
    }
    level
}

struct Source<'a, I, C> {
    entries: I,
    comparator: Option<&'a C>,
    expected: usize,
    taken: usize,
    prev: Option<u32>,
}

/// Builds a balanced tree holding the first `len` entries of `entries` and
/// returns its root.
///
/// With a comparator, every key is checked to be strictly greater than the
/// previous one. Without one the caller vouches for the order. On error the
/// nodes allocated so far stay in `store`; callers build into a fresh store
/// and drop it.
pub fn build_from_sorted<K, V, I, C>(
    store: &mut NodeStore<K, V>,
    len: usize,
    entries: I,
    comparator: Option<&C>,
) -> Result<Option<u32>>
where
    I: Iterator<Item = (K, V)>,
    C: Comparator<K>,
{
    if len == 0 {
        return Ok(None);
    }
    let mut source = Source {
        entries,
        comparator,
        expected: len,
        taken: 0,
        prev: None,
    };
    build(store, 0, 0, len - 1, red_level(len), &mut source)
}

fn build<K, V, I, C>(
    store: &mut NodeStore<K, V>,
    level: usize,
    lo: usize,
    hi: usize,
    red_level: usize,
    source: &mut Source<'_, I, C>,
) -> Result<Option<u32>>
where
    I: Iterator<Item = (K, V)>,
    C: Comparator<K>,
{
    let mid = lo + (hi - lo) / 2;

    let left = if lo < mid {
        build(store, level + 1, lo, mid - 1, red_level, source)?
    } else {
        None
    };

    let Some((key, value)) = source.entries.next() else {
        return Err(TreeMapError::LengthMismatch {
            expected: source.expected,
            actual: source.taken,
        });
    };
    if let Some(comparator) = source.comparator {
        check_key(comparator, &key)?;
        if let Some(prev) = source.prev {
            if order(comparator, &store[prev].key, &key)? != Ordering::Less {
                return Err(TreeMapError::UnsortedInput);
            }
        }
    }
    source.taken += 1;

    let middle = store.alloc(key, value);
    source.prev = Some(middle);
    store[middle].color = if level == red_level {
        Color::Red
    } else {
        Color::Black
    };

    if let Some(left) = left {
        store[middle].l = Some(left);
        store[left].p = Some(middle);
    }

    if mid < hi {
        if let Some(right) = build(store, level + 1, mid + 1, hi, red_level, source)? {
            store[middle].r = Some(right);
            store[right].p = Some(middle);
        }
    }

    Ok(Some(middle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::NaturalOrder;
    use crate::red_black::{assert_red_black_tree, height};

    #[test]
    fn red_level_matches_partial_bottom_row() {
        assert_eq!(red_level(0), 0);
        assert_eq!(red_level(1), 1);
        assert_eq!(red_level(2), 1);
        assert_eq!(red_level(3), 2);
        assert_eq!(red_level(4), 2);
        assert_eq!(red_level(7), 3);
        assert_eq!(red_level(8), 3);
        assert_eq!(red_level(1023), 10);
    }

    #[test]
    fn every_size_up_to_300_is_a_valid_tree() {
        for len in 0..300usize {
            let mut store = NodeStore::new();
            let root = build_from_sorted(
                &mut store,
                len,
                (0..len as i32).map(|k| (k, k)),
                Some(&NaturalOrder),
            )
            .unwrap();
            assert_red_black_tree(&store, root, len, &NaturalOrder)
                .unwrap_or_else(|err| panic!("invalid tree for len={len}: {err}"));
        }
    }

    #[test]
    fn height_is_minimal() {
        let mut store = NodeStore::new();
        let root =
            build_from_sorted(&mut store, 1023, (1..=1023).map(|k| (k, ())), Some(&NaturalOrder))
                .unwrap();
        assert_eq!(height(&store, root), 10);
    }

    #[test]
    fn short_and_unsorted_sources_are_rejected() {
        let mut store = NodeStore::new();
        let err = build_from_sorted(&mut store, 5, (0..3).map(|k| (k, k)), Some(&NaturalOrder));
        assert_eq!(
            err,
            Err(TreeMapError::LengthMismatch {
                expected: 5,
                actual: 3
            })
        );

        let mut store = NodeStore::new();
        let err = build_from_sorted(
            &mut store,
            3,
            [(1, 1), (3, 3), (2, 2)].into_iter(),
            Some(&NaturalOrder),
        );
        assert_eq!(err, Err(TreeMapError::UnsortedInput));
    }
}
