use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;

use tracing::{debug, trace};

use crate::build::build_from_sorted;
use crate::compare::{check_key, order, Comparator, NaturalOrder};
use crate::cursor::{Cursor, Direction};
use crate::error::{Result, TreeMapError};
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::navigate;
use crate::node::NodeStore;
use crate::range::{KeyRange, RangeView};
use crate::red_black;

type NodeQuery<K, V, C> = fn(&NodeStore<K, V>, Option<u32>, &K, &C) -> Result<Option<u32>>;

/// Ordered map backed by an arena red-black tree.
///
/// Keys are ordered by the comparator `C` ([`NaturalOrder`] by default).
/// Every lookup that compares keys returns a [`Result`], since a comparator
/// may refuse to order a pair of keys.
pub struct TreeMap<K, V, C = NaturalOrder> {
    store: NodeStore<K, V>,
    root: Option<u32>,
    len: usize,
    /// Bumped on every change to the tree's shape or node count.
    version: u64,
    comparator: C,
}

impl<K: PartialOrd, V> TreeMap<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Builds a map from `len` entries already in ascending key order, in
    /// linear time.
    pub fn from_sorted<I>(len: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_sorted_with(NaturalOrder, len, entries)
    }
}

impl<K: PartialOrd, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            store: NodeStore::new(),
            root: None,
            len: 0,
            version: 0,
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Structural version; changes whenever an entry is added or removed.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    #[inline]
    pub(crate) fn store(&self) -> &NodeStore<K, V> {
        &self.store
    }

    #[inline]
    pub(crate) fn key_at(&self, i: u32) -> &K {
        &self.store[i].key
    }

    #[inline]
    pub(crate) fn entry_at(&self, i: u32) -> (&K, &V) {
        let node = &self.store[i];
        (&node.key, &node.value)
    }

    #[inline]
    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    pub(crate) fn first_node(&self) -> Option<u32> {
        navigate::first(&self.store, self.root)
    }

    pub(crate) fn last_node(&self) -> Option<u32> {
        navigate::last(&self.store, self.root)
    }

    /// Unlinks node `i`, releases its slot and returns the index of the slot
    /// actually freed together with the removed entry.
    pub(crate) fn delete_node(&mut self, i: u32) -> (u32, (K, V)) {
        let (root, gone) = red_black::remove(&mut self.store, self.root, i);
        self.root = root;
        self.len -= 1;
        self.bump();
        let entry = self.store.release(gone);
        trace!(len = self.len, "removed node");
        (gone, entry)
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.root = None;
        self.len = 0;
        self.bump();
        debug!("cleared map");
    }

    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.first_node().map(|i| self.entry_at(i))
    }

    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.last_node().map(|i| self.entry_at(i))
    }

    pub fn first_key(&self) -> Result<&K> {
        self.first_node()
            .map(|i| self.key_at(i))
            .ok_or(TreeMapError::EmptyStructure)
    }

    pub fn last_key(&self) -> Result<&K> {
        self.last_node()
            .map(|i| self.key_at(i))
            .ok_or(TreeMapError::EmptyStructure)
    }

    /// Removes and returns the entry with the least key.
    pub fn poll_first_entry(&mut self) -> Option<(K, V)> {
        let i = self.first_node()?;
        Some(self.delete_node(i).1)
    }

    /// Removes and returns the entry with the greatest key.
    pub fn poll_last_entry(&mut self) -> Option<(K, V)> {
        let i = self.last_node()?;
        Some(self.delete_node(i).1)
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Entries in ascending key order; `.rev()` for descending.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.store, self.first_node(), self.last_node(), false)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.store, self.root)
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Fail-fast ascending cursor over the whole map.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.first_node(), None, self.version, Direction::Ascending)
    }

    /// Fail-fast descending cursor over the whole map.
    pub fn descending_cursor(&self) -> Cursor {
        Cursor::new(self.last_node(), None, self.version, Direction::Descending)
    }

    /// Window over the whole map in descending key order.
    pub fn descending_map(&self) -> RangeView<&Self, K, V, C> {
        RangeView::new(self, KeyRange::full(true))
    }

    pub fn descending_map_mut(&mut self) -> RangeView<&mut Self, K, V, C> {
        RangeView::new(self, KeyRange::full(true))
    }

    /// Longest root-to-leaf path, in nodes.
    pub fn height(&self) -> usize {
        red_black::height(&self.store, self.root)
    }

    /// Indented dump of the tree with node colors.
    pub fn print_tree(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        red_black::print(&self.store, self.root, "")
    }
}

impl<K, V, C> TreeMap<K, V, C>
where
    C: Comparator<K>,
{
    /// Builds a map from `len` entries already in ascending order under
    /// `comparator`, in linear time.
    pub fn from_sorted_with<I>(comparator: C, len: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_comparator(comparator);
        let root = build_from_sorted(&mut map.store, len, entries.into_iter(), Some(&map.comparator))?;
        map.root = root;
        map.len = len;
        debug!(len, "bulk-loaded map");
        Ok(map)
    }

    fn query(&self, key: &K, f: NodeQuery<K, V, C>) -> Result<Option<u32>> {
        check_key(&self.comparator, key)?;
        f(&self.store, self.root, key, &self.comparator)
    }

    pub(crate) fn find_node(&self, key: &K) -> Result<Option<u32>> {
        self.query(key, navigate::find)
    }

    pub(crate) fn ceiling_node(&self, key: &K) -> Result<Option<u32>> {
        self.query(key, navigate::ceiling)
    }

    pub(crate) fn floor_node(&self, key: &K) -> Result<Option<u32>> {
        self.query(key, navigate::floor)
    }

    pub(crate) fn higher_node(&self, key: &K) -> Result<Option<u32>> {
        self.query(key, navigate::higher)
    }

    pub(crate) fn lower_node(&self, key: &K) -> Result<Option<u32>> {
        self.query(key, navigate::lower)
    }

    pub fn get(&self, key: &K) -> Result<Option<&V>> {
        Ok(self.find_node(key)?.map(|i| &self.store[i].value))
    }

    pub fn get_mut(&mut self, key: &K) -> Result<Option<&mut V>> {
        Ok(self.find_node(key)?.map(|i| &mut self.store[i].value))
    }

    pub fn contains_key(&self, key: &K) -> Result<bool> {
        Ok(self.find_node(key)?.is_some())
    }

    /// Inserts `value` under `key`. An existing entry keeps its node and has
    /// its value replaced; the old value is returned.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        check_key(&self.comparator, &key)?;

        let mut parent = None;
        let mut side = Ordering::Equal;
        let mut curr = self.root;
        while let Some(i) = curr {
            side = order(&self.comparator, &key, &self.store[i].key)?;
            parent = Some(i);
            curr = match side {
                Ordering::Less => self.store[i].l,
                Ordering::Greater => self.store[i].r,
                Ordering::Equal => {
                    return Ok(Some(std::mem::replace(&mut self.store[i].value, value)));
                }
            };
        }

        let n = self.store.alloc(key, value);
        self.root = red_black::insert_at(&mut self.store, self.root, n, parent, side);
        self.len += 1;
        self.bump();
        trace!(len = self.len, "inserted node");
        Ok(None)
    }

    /// Inserts every entry of `entries` in turn, stopping at the first error.
    pub fn put_all<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.put(key, value)?;
        }
        Ok(())
    }

    /// Copies every entry of `other` into this map. An empty map is rebuilt
    /// from `other` in linear time by the bulk loader; otherwise the entries
    /// are inserted one by one.
    pub fn put_all_from(&mut self, other: &Self) -> Result<()>
    where
        K: Clone,
        V: Clone,
    {
        let entries = other.iter().map(|(k, v)| (k.clone(), v.clone()));
        if !self.is_empty() || other.is_empty() {
            return self.put_all(entries);
        }
        let mut store = NodeStore::new();
        let root = build_from_sorted(&mut store, other.len, entries, Some(&self.comparator))?;
        self.store = store;
        self.root = root;
        self.len = other.len;
        self.bump();
        debug!(len = self.len, "bulk-loaded from sorted map");
        Ok(())
    }

    /// Removes `key`. An absent key leaves the map, including its version,
    /// untouched.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>> {
        let Some(i) = self.find_node(key)? else {
            return Ok(None);
        };
        let (_, (_, value)) = self.delete_node(i);
        Ok(Some(value))
    }

    pub fn floor_entry(&self, key: &K) -> Result<Option<(&K, &V)>> {
        Ok(self.floor_node(key)?.map(|i| self.entry_at(i)))
    }

    pub fn floor_key(&self, key: &K) -> Result<Option<&K>> {
        Ok(self.floor_node(key)?.map(|i| self.key_at(i)))
    }

    pub fn ceiling_entry(&self, key: &K) -> Result<Option<(&K, &V)>> {
        Ok(self.ceiling_node(key)?.map(|i| self.entry_at(i)))
    }

    pub fn ceiling_key(&self, key: &K) -> Result<Option<&K>> {
        Ok(self.ceiling_node(key)?.map(|i| self.key_at(i)))
    }

    pub fn lower_entry(&self, key: &K) -> Result<Option<(&K, &V)>> {
        Ok(self.lower_node(key)?.map(|i| self.entry_at(i)))
    }

    pub fn lower_key(&self, key: &K) -> Result<Option<&K>> {
        Ok(self.lower_node(key)?.map(|i| self.key_at(i)))
    }

    pub fn higher_entry(&self, key: &K) -> Result<Option<(&K, &V)>> {
        Ok(self.higher_node(key)?.map(|i| self.entry_at(i)))
    }

    pub fn higher_key(&self, key: &K) -> Result<Option<&K>> {
        Ok(self.higher_node(key)?.map(|i| self.key_at(i)))
    }

    fn window(&self, lo: Bound<K>, hi: Bound<K>) -> Result<KeyRange<K>> {
        KeyRange::new(lo, hi, false, &self.comparator)
    }

    /// Window over keys from `lo` to `hi`.
    pub fn sub_map(
        &self,
        lo: K,
        lo_inclusive: bool,
        hi: K,
        hi_inclusive: bool,
    ) -> Result<RangeView<&Self, K, V, C>> {
        let range = self.window(bound(lo, lo_inclusive), bound(hi, hi_inclusive))?;
        Ok(RangeView::new(self, range))
    }

    pub fn sub_map_mut(
        &mut self,
        lo: K,
        lo_inclusive: bool,
        hi: K,
        hi_inclusive: bool,
    ) -> Result<RangeView<&mut Self, K, V, C>> {
        let range = self.window(bound(lo, lo_inclusive), bound(hi, hi_inclusive))?;
        Ok(RangeView::new(self, range))
    }

    /// Window over keys below `hi`.
    pub fn head_map(&self, hi: K, inclusive: bool) -> Result<RangeView<&Self, K, V, C>> {
        let range = self.window(Bound::Unbounded, bound(hi, inclusive))?;
        Ok(RangeView::new(self, range))
    }

    pub fn head_map_mut(&mut self, hi: K, inclusive: bool) -> Result<RangeView<&mut Self, K, V, C>> {
        let range = self.window(Bound::Unbounded, bound(hi, inclusive))?;
        Ok(RangeView::new(self, range))
    }

    /// Window over keys above `lo`.
    pub fn tail_map(&self, lo: K, inclusive: bool) -> Result<RangeView<&Self, K, V, C>> {
        let range = self.window(bound(lo, inclusive), Bound::Unbounded)?;
        Ok(RangeView::new(self, range))
    }

    pub fn tail_map_mut(&mut self, lo: K, inclusive: bool) -> Result<RangeView<&mut Self, K, V, C>> {
        let range = self.window(bound(lo, inclusive), Bound::Unbounded)?;
        Ok(RangeView::new(self, range))
    }

    /// Checks every structural invariant of the tree.
    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        red_black::assert_red_black_tree(&self.store, self.root, self.len, &self.comparator)
    }
}

pub(crate) fn bound<K>(key: K, inclusive: bool) -> Bound<K> {
    if inclusive {
        Bound::Included(key)
    } else {
        Bound::Excluded(key)
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for TreeMap<K, V, C> {
    /// Rebuilds the copy with the bulk loader rather than re-inserting.
    fn clone(&self) -> Self {
        let mut map = Self::with_comparator(self.comparator.clone());
        let entries = self.iter().map(|(k, v)| (k.clone(), v.clone()));
        map.root = build_from_sorted::<K, V, _, fn(&K, &K) -> Ordering>(
            &mut map.store,
            self.len,
            entries,
            None,
        )
        .expect("entries of a valid map are counted");
        map.len = self.len;
        map
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for TreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for TreeMap<K, V, C> {}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut TreeMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.store, self.root)
    }
}
