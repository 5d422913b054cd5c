//! Borrowing iterators over a map or a view window.
//!
//! These hold a borrow of the map, so the map cannot change under them and no
//! version check is needed. Use [`Cursor`](crate::Cursor) to remove entries
//! while traversing.

use std::iter::FusedIterator;

use crate::navigate::{predecessor, successor};
use crate::node::NodeStore;

/// Entries between two nodes, both ends inclusive.
///
/// A descending iterator (from a descending view) yields from the high end;
/// `next_back` then walks up from the low end.
pub struct Iter<'a, K, V> {
    store: &'a NodeStore<K, V>,
    low: Option<u32>,
    high: Option<u32>,
    descending: bool,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// `low` and `high` must both be `None` or both lie in the tree with
    /// `low` not after `high`.
    pub(crate) fn new(
        store: &'a NodeStore<K, V>,
        low: Option<u32>,
        high: Option<u32>,
        descending: bool,
    ) -> Self {
        debug_assert_eq!(low.is_some(), high.is_some());
        Self {
            store,
            low,
            high,
            descending,
        }
    }

    fn entry(&self, i: u32) -> (&'a K, &'a V) {
        let node = &self.store[i];
        (&node.key, &node.value)
    }

    fn pop_low(&mut self) -> Option<(&'a K, &'a V)> {
        let i = self.low?;
        if self.low == self.high {
            self.low = None;
            self.high = None;
        } else {
            self.low = successor(self.store, i);
        }
        Some(self.entry(i))
    }

    fn pop_high(&mut self) -> Option<(&'a K, &'a V)> {
        let i = self.high?;
        if self.low == self.high {
            self.low = None;
            self.high = None;
        } else {
            self.high = predecessor(self.store, i);
        }
        Some(self.entry(i))
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            low: self.low,
            high: self.high,
            descending: self.descending,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.descending {
            self.pop_high()
        } else {
            self.pop_low()
        }
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.descending {
            self.pop_low()
        } else {
            self.pop_high()
        }
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Keys in order.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Values in key order.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Entries in key order with mutable values.
pub struct IterMut<'a, K, V> {
    inner: std::iter::Flatten<std::vec::IntoIter<Option<(&'a K, &'a mut V)>>>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(store: &'a mut NodeStore<K, V>, root: Option<u32>) -> Self {
        let order = in_order(store, root);
        Self {
            inner: store.entries_mut_ranked(&order).into_iter().flatten(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// Mutable values in key order.
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

/// Owning iterator, in key order.
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(mut store: NodeStore<K, V>, root: Option<u32>) -> Self {
        let order = in_order(&store, root);
        let entries: Vec<(K, V)> = order.into_iter().map(|i| store.release(i)).collect();
        Self {
            inner: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

fn in_order<K, V>(store: &NodeStore<K, V>, root: Option<u32>) -> Vec<u32> {
    let mut order = Vec::with_capacity(store.live());
    let mut curr = crate::navigate::first(store, root);
    while let Some(i) = curr {
        order.push(i);
        curr = successor(store, i);
    }
    order
}
