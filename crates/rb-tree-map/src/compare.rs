//! Key ordering.
//!
//! A [`TreeMap`](crate::TreeMap) orders its keys through a [`Comparator`].
//! Three flavours are provided:
//!
//! - [`NaturalOrder`] uses the key's own `PartialOrd`. Keys that do not even
//!   compare equal to themselves (`f64::NAN`) are rejected up front.
//! - Any `Fn(&K, &K) -> Ordering` closure is an infallible comparator.
//! - [`TryOrder`] wraps a `Fn(&K, &K) -> Option<Ordering>` closure whose
//!   `None` is reported as [`TreeMapError::Comparison`].

use std::cmp::Ordering;

use crate::error::{Result, TreeMapError};

/// Total order over keys of type `K`.
pub trait Comparator<K> {
    /// `None` means the two keys cannot be ordered.
    fn compare(&self, a: &K, b: &K) -> Option<Ordering>;

    /// Whether `key` may be stored at all.
    fn accepts(&self, _key: &K) -> bool {
        true
    }
}

/// Ordering by the key type's own `PartialOrd`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: PartialOrd> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Option<Ordering> {
        a.partial_cmp(b)
    }

    fn accepts(&self, key: &K) -> bool {
        key.partial_cmp(key) == Some(Ordering::Equal)
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Option<Ordering> {
        Some(self(a, b))
    }
}

/// Adapter for comparison functions that may fail.
#[derive(Clone, Copy, Debug)]
pub struct TryOrder<F>(pub F);

impl<K, F> Comparator<K> for TryOrder<F>
where
    F: Fn(&K, &K) -> Option<Ordering>,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Option<Ordering> {
        (self.0)(a, b)
    }
}

#[inline]
pub(crate) fn order<K, C: Comparator<K>>(comparator: &C, a: &K, b: &K) -> Result<Ordering> {
    comparator.compare(a, b).ok_or(TreeMapError::Comparison)
}

#[inline]
pub(crate) fn check_key<K, C: Comparator<K>>(comparator: &C, key: &K) -> Result<()> {
    if comparator.accepts(key) {
        Ok(())
    } else {
        Err(TreeMapError::InvalidKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_rejects_self_incomparable_keys() {
        assert!(Comparator::<f64>::accepts(&NaturalOrder, &1.5));
        assert!(!Comparator::<f64>::accepts(&NaturalOrder, &f64::NAN));
        assert_eq!(order(&NaturalOrder, &1.0, &f64::NAN), Err(TreeMapError::Comparison));
    }

    #[test]
    fn closures_and_try_order_are_comparators() {
        let rev = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(order(&rev, &1, &2), Ok(Ordering::Greater));

        let picky = TryOrder(|a: &i32, b: &i32| if *a < 0 || *b < 0 { None } else { Some(a.cmp(b)) });
        assert_eq!(order(&picky, &1, &2), Ok(Ordering::Less));
        assert_eq!(order(&picky, &-1, &2), Err(TreeMapError::Comparison));
    }
}
